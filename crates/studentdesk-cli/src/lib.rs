//! # studentdesk CLI
//!
//! Operator tasks that have no HTTP endpoint: creating local login accounts
//! and filling the student collection with demo data.
//!
//! ## Usage
//!
//! ```ignore
//! use studentdesk_cli::seeder::seed_students;
//!
//! let store = PgStudentStore::new(pool);
//! seed_students(&store, 500).await?;
//! ```

pub mod accounts;
pub mod seeder;
