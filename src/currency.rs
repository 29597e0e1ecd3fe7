//! Locale-aware currency rendering.
//!
//! Formatting is a pure function of the amount and an explicit [`LocaleConfig`];
//! nothing here touches process-wide locale state.

/// Monetary conventions for a locale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    pub name: String,
    pub symbol: String,
    pub symbol_after: bool,
    pub symbol_separated: bool,
    pub thousands_separator: String,
    pub decimal_separator: String,
}

impl LocaleConfig {
    fn build(
        name: &str,
        symbol: &str,
        symbol_after: bool,
        symbol_separated: bool,
        thousands_separator: &str,
        decimal_separator: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
            symbol_after,
            symbol_separated,
            thousands_separator: thousands_separator.to_string(),
            decimal_separator: decimal_separator.to_string(),
        }
    }

    /// `$#,##0.00`, used when no locale data is available
    pub fn fallback() -> Self {
        Self::build("en_US", "$", false, false, ",", ".")
    }

    /// Look up conventions by a POSIX locale name such as `de_DE.UTF-8`
    pub fn from_locale_name(locale: &str) -> Option<Self> {
        let base = locale
            .split(['.', '@'])
            .next()
            .unwrap_or_default()
            .replace('-', "_");

        let config = match base.as_str() {
            "en_US" => Self::fallback(),
            "en_GB" => Self::build("en_GB", "£", false, false, ",", "."),
            "en_IE" => Self::build("en_IE", "€", false, false, ",", "."),
            "de_AT" => Self::build("de_AT", "€", false, true, ".", ","),
            "nl_NL" => Self::build("nl_NL", "€", false, true, ".", ","),
            "es_ES" => Self::build("es_ES", "€", true, true, ".", ","),
            "it_IT" => Self::build("it_IT", "€", true, true, ".", ","),
            "en_CA" => Self::build("en_CA", "$", false, false, ",", "."),
            "en_AU" => Self::build("en_AU", "$", false, false, ",", "."),
            "de_DE" => Self::build("de_DE", "€", true, true, ".", ","),
            "fr_FR" => Self::build("fr_FR", "€", true, true, "\u{202f}", ","),
            "ja_JP" => Self::build("ja_JP", "￥", false, false, ",", "."),
            "pt_BR" => Self::build("pt_BR", "R$", false, true, ".", ","),
            _ => return None,
        };
        Some(config)
    }

    /// Resolve conventions from an explicit override or the environment.
    ///
    /// Checks `LC_ALL`, `LC_MONETARY` and `LANG` in that order. `C`, `POSIX`
    /// and unknown locales resolve to [`LocaleConfig::fallback`].
    pub fn detect(explicit: Option<&str>) -> Self {
        let candidate = explicit.map(str::to_string).or_else(|| {
            ["LC_ALL", "LC_MONETARY", "LANG"]
                .iter()
                .filter_map(|var| std::env::var(var).ok())
                .find(|value| !value.is_empty())
        });

        match candidate {
            Some(locale) => Self::from_locale_name(&locale).unwrap_or_else(|| {
                tracing::debug!(locale = %locale, "No currency data for locale, using fallback");
                Self::fallback()
            }),
            None => Self::fallback(),
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self::fallback()
    }
}

/// Group the digits of a non-negative integer string by thousands
fn group_thousands(digits: &str, separator: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// Format an amount with grouped thousands, two decimals and the locale's symbol
pub fn format_currency(amount: f64, locale: &LocaleConfig) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let number = format!(
        "{}{}{}",
        group_thousands(integer, &locale.thousands_separator),
        locale.decimal_separator,
        fraction
    );

    let space = if locale.symbol_separated { "\u{a0}" } else { "" };
    let body = if locale.symbol_after {
        format!("{}{}{}", number, space, locale.symbol)
    } else {
        format!("{}{}{}", locale.symbol, space, number)
    };

    if amount < 0.0 && fixed != "0.00" {
        format!("-{}", body)
    } else {
        body
    }
}
