mod token;

pub use token::NoTokenError;
pub use token::RefreshPlan;
pub use token::TokenManager;
pub use token::plan;
