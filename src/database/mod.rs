mod db;

pub use db::{connect_to_mongo, db_name};
