pub mod account_repository;
pub mod argon2_password_hasher;
pub mod database;
pub mod entities;
pub mod in_memory_account_repository;
