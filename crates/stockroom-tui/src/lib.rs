pub mod app;
pub mod components;
pub mod dispatch;
pub mod route;
pub mod views;
