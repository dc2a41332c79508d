mod state;

pub use state::AsyncFrom;
pub use state::Inner;
pub use state::Response;
