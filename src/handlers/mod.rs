pub mod auth;
pub mod businesses;
pub mod forms;
pub mod helpers;
pub mod middleware;
pub mod regions;
pub mod system;
