pub mod authenticate_usecase;
pub mod manage_account_usecase;
pub mod register_account_usecase;
