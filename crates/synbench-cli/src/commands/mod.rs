pub mod compare;
pub mod init;
pub mod list_models;
pub mod run;
pub mod validate;
