//! Infrastructure layer - Database, persistence, and file storage.

pub mod db;
pub mod repositories;
pub mod storage;
