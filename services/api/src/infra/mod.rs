pub mod db;
pub mod mail;
pub mod media;
pub mod sweeper;
