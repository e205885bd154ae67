pub mod bots;
pub mod calls;
pub mod functions;
pub mod health;
pub mod vendor;
pub mod webhooks;
