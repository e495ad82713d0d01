//! Storage nodes
//!
//! MongoDB reads and updates. The triggered variants gate on an Action
//! input because they have side effects.

mod mongodb;

pub use mongodb::{MongoDb, MongoDbGet, MongoDbUpdate};
