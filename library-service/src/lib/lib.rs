pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::author;
pub use domain::book;
pub use domain::reconcile;
pub use domain::user;
pub use outbound::repositories;
