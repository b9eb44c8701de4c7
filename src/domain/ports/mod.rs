pub mod inbound;

pub use inbound::AccountService;
