pub mod catalog;
pub mod generate;
pub mod token;

pub use catalog::CatalogCommand;
pub use generate::GenerateCommand;
pub use token::TokenCommand;
