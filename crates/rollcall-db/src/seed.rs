//! Demo dataset for first-run installs: one faculty account, three
//! classes with enrollments, and a window of archived day summaries.

use rollcall_core::Result;
use rollcall_core::models::faculty::CreateFacultyAccount;
use rollcall_core::models::summary::CreateDaySummary;
use rollcall_core::repository::HistoryRepository;
use serde::Deserialize;
use surrealdb::{Connection, Surreal};
use tracing::info;
use uuid::Uuid;

use crate::error::DbError;
use crate::repository::{
    SurrealCredentialRepository, SurrealHistoryRepository, SurrealRosterRepository,
};

/// The demo login; the password behind the supplied hash is
/// `password123`.
pub const DEMO_FACULTY_EMAIL: &str = "faculty@example.com";

const CS101_STUDENTS: &[(&str, &str, &str)] = &[
    ("2023001", "Juan Dela Cruz", "juan.delacruz@email.com"),
    ("2023002", "Maria Santos", "maria.santos@email.com"),
    ("2023003", "Pedro Garcia", "pedro.garcia@email.com"),
    ("2023004", "Ana Lopez", "ana.lopez@email.com"),
    ("2023005", "Carlos Rodriguez", "carlos.rodriguez@email.com"),
    ("2023006", "Isabella Martinez", "isabella.martinez@email.com"),
    ("2023007", "Miguel Torres", "miguel.torres@email.com"),
    ("2023008", "Sofia Ramirez", "sofia.ramirez@email.com"),
    ("2023009", "Diego Morales", "diego.morales@email.com"),
    ("2023010", "Valentina Herrera", "valentina.herrera@email.com"),
    ("2023011", "Alejandro Silva", "alejandro.silva@email.com"),
    ("2023012", "Camila Vargas", "camila.vargas@email.com"),
];

const CS201_STUDENTS: &[(&str, &str, &str)] = &[
    ("2022101", "Luis Fernandez", "luis.fernandez@email.com"),
    ("2022102", "Gabriela Cruz", "gabriela.cruz@email.com"),
    ("2022103", "Mateo Reyes", "mateo.reyes@email.com"),
    ("2022104", "Lucia Flores", "lucia.flores@email.com"),
    ("2022105", "Andres Castillo", "andres.castillo@email.com"),
    ("2022106", "Elena Gutierrez", "elena.gutierrez@email.com"),
];

const CS301_STUDENTS: &[(&str, &str, &str)] = &[
    ("2021201", "Ramon Aquino", "ramon.aquino@email.com"),
    ("2021202", "Patricia Navarro", "patricia.navarro@email.com"),
    ("2021203", "Victor Mendoza", "victor.mendoza@email.com"),
    ("2021204", "Teresa Salazar", "teresa.salazar@email.com"),
    ("2021205", "Oscar Villanueva", "oscar.villanueva@email.com"),
    ("2021206", "Rosa Domingo", "rosa.domingo@email.com"),
];

/// Archived class-days, newest first: (date, class index, total,
/// present, absent, late).
const HISTORY: &[(&str, usize, u32, u32, u32, u32)] = &[
    ("2024-01-15", 0, 45, 38, 5, 2),
    ("2024-01-14", 0, 45, 42, 2, 1),
    ("2024-01-13", 1, 32, 28, 3, 1),
    ("2024-01-12", 2, 28, 25, 2, 1),
    ("2024-01-11", 0, 45, 40, 4, 1),
];

#[derive(Debug, Deserialize)]
struct CountRow {
    total: u64,
}

/// Populate the demo dataset unless the database already has content.
/// The caller supplies the Argon2id hash for the demo credential so
/// this crate stays free of the hashing dependency.
pub async fn seed_demo_data<C: Connection>(
    db: &Surreal<C>,
    faculty_password_hash: String,
) -> Result<()> {
    let mut result = db
        .query("SELECT count() AS total FROM faculty GROUP ALL")
        .await
        .map_err(DbError::from)?;
    let rows: Vec<CountRow> = result.take(0).map_err(DbError::from)?;
    if rows.first().map(|r| r.total).unwrap_or(0) > 0 {
        info!("Demo data already present, skipping seed");
        return Ok(());
    }

    info!("Seeding demo data");

    let credentials = SurrealCredentialRepository::new(db.clone());
    credentials
        .create(CreateFacultyAccount {
            name: "Dr. John Smith".into(),
            email: DEMO_FACULTY_EMAIL.into(),
            role: "faculty".into(),
            department: "Computer Science".into(),
            password_hash: faculty_password_hash,
        })
        .await?;

    let rosters = SurrealRosterRepository::new(db.clone());
    let catalog = [
        ("Introduction to Computer Science", "CS101", CS101_STUDENTS),
        ("Data Structures and Algorithms", "CS201", CS201_STUDENTS),
        ("Web Development Fundamentals", "CS301", CS301_STUDENTS),
    ];

    let mut class_ids: Vec<Uuid> = Vec::with_capacity(catalog.len());
    for &(name, subject_code, students) in &catalog {
        let class = rosters.create_class(name, subject_code).await?;
        for (student_id, student_name, email) in students {
            rosters
                .enroll_student(class.id, student_id, student_name, email)
                .await?;
        }
        class_ids.push(class.id);
    }

    let history = SurrealHistoryRepository::new(db.clone());
    for (date, class_index, total, present, absent, late) in HISTORY {
        let class_id = class_ids[*class_index];
        let (class_name, subject_code, _) = catalog[*class_index];
        history
            .append(CreateDaySummary {
                date: date.parse().map_err(|e| {
                    DbError::Corrupt(format!("invalid seed date {date}: {e}"))
                })?,
                class_id,
                class_name: class_name.into(),
                subject_code: subject_code.into(),
                total_students: *total,
                present: *present,
                absent: *absent,
                late: *late,
            })
            .await?;
    }

    info!("Demo data seeded");
    Ok(())
}
