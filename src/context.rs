use crate::token::{RandomTokenGenerator, TokenGenerator};
use crate::traits::{
    FileSystem, InquireUserInput, Output, RealFileSystem, TerminalOutput, UserInput,
};
use std::sync::Arc;

/// Everything a command touches outside its own arguments.
///
/// Commands take `&Context` so tests can swap in the mocks from `traits`.
#[derive(Clone)]
pub struct Context {
    pub fs: Arc<dyn FileSystem>,
    pub input: Arc<dyn UserInput>,
    pub output: Arc<dyn Output>,
    pub tokens: Arc<dyn TokenGenerator>,
}

impl Context {
    /// Disk, terminal prompts, colored stdout and a thread-local RNG
    pub fn new() -> Self {
        Self {
            fs: Arc::new(RealFileSystem),
            input: Arc::new(InquireUserInput),
            output: Arc::new(TerminalOutput),
            tokens: Arc::new(RandomTokenGenerator),
        }
    }

    /// Context with empty mocks and a fixed token
    #[cfg(test)]
    pub fn test() -> Self {
        use crate::token::FixedTokenGenerator;
        use crate::traits::{MockFileSystem, MockOutput, MockUserInput};

        Self::test_with(
            Arc::new(MockFileSystem::new()),
            Arc::new(MockUserInput::new()),
            Arc::new(MockOutput::new()),
            Arc::new(FixedTokenGenerator("0123456789abcDef012".to_string())),
        )
    }

    #[cfg(test)]
    pub fn test_with(
        fs: Arc<dyn FileSystem>,
        input: Arc<dyn UserInput>,
        output: Arc<dyn Output>,
        tokens: Arc<dyn TokenGenerator>,
    ) -> Self {
        Self {
            fs,
            input,
            output,
            tokens,
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
