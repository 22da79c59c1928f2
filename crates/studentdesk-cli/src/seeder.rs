//! Demo student generation.

use std::time::Instant;

use fake::Fake;
use fake::faker::boolean::en::Boolean;
use fake::faker::name::en::Name;
use rayon::prelude::*;
use studentdesk_db::{PgStudentStore, StoreError};
use studentdesk_models::students::{NewStudent, StudentStatus};

// 5 params per student
const BATCH_SIZE: usize = 1000;

/// Generates `count` students with random names, ages 5..=18 and roughly one
/// in five marked inactive.
pub fn generate_students(count: usize) -> Vec<NewStudent> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let name: String = Name().fake();
            let active: bool = Boolean(80).fake();

            NewStudent {
                image: format!("https://i.pravatar.cc/150?img={}", idx % 70 + 1),
                name,
                age: (5..19).fake::<i32>(),
                status: if active {
                    StudentStatus::Active
                } else {
                    StudentStatus::Inactive
                },
            }
        })
        .collect()
}

/// Inserts `count` generated students in batches.
pub async fn seed_students(store: &PgStudentStore, count: usize) -> Result<u64, StoreError> {
    let start_time = Instant::now();
    println!("🎓 Seeding {} students...", count);

    let students = generate_students(count);

    let mut inserted = 0;
    for chunk in students.chunks(BATCH_SIZE) {
        inserted += store.insert_batch(chunk).await?;
    }

    println!(
        "   ✓ Inserted {} students in {:?}",
        inserted,
        start_time.elapsed()
    );

    Ok(inserted)
}
