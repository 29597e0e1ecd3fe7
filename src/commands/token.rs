use crate::context::Context;
use anyhow::Result;

/// Handles the 'token' command - prints a freshly generated auth token
pub struct TokenCommand;

impl TokenCommand {
    pub fn execute(ctx: &Context) -> Result<()> {
        ctx.output.plain(&ctx.tokens.generate());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{TEST_TOKEN, test_context};
    use crate::traits::{MockOutput, MockUserInput, OutputMessage};
    use std::sync::Arc;

    #[test]
    fn test_token_is_printed_plain() {
        let output = Arc::new(MockOutput::new());
        let ctx = test_context(Arc::new(MockUserInput::new()), Arc::clone(&output));

        TokenCommand::execute(&ctx).unwrap();

        assert_eq!(
            output.get_messages(),
            vec![OutputMessage::Plain(TEST_TOKEN.to_string())]
        );
    }
}
