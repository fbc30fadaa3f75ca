//! Deterministic demo catalogue and accounts for local runs and demos.
//!
//! The backend seeds an empty data directory from these fixtures when its
//! `seed-data` feature is enabled. The crate is deliberately independent of
//! backend domain types to avoid circular dependencies: it exposes plain
//! serde-friendly records that the backend converts at its own boundary.
//!
//! The catalogue is fixed at twelve courses so a default page size of nine
//! demonstrates a two-page listing out of the box.

use serde::{Deserialize, Serialize};

/// Demo course record in wire shape (camelCase is irrelevant here; the
/// backend re-serialises through its own domain types).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedCourse {
    /// Stable demo identifier.
    pub id: i64,
    /// Course title in the catalogue's display language.
    pub title: String,
    /// Catalogue category slug.
    pub category: String,
    /// Price in hryvnias.
    pub price: f64,
    /// Popularity score from 0 to 100.
    pub popularity: u8,
    /// Free-form tags used by the text filter.
    pub tags: Vec<String>,
    /// Short description shown on the course card.
    pub description: String,
}

/// Demo account record.
///
/// `password` is the plaintext demo secret; the backend derives its salted
/// digest at seeding time so the persisted user file never contains it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedUser {
    /// Stable demo identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Unique login email.
    pub email: String,
    /// Role slug, `admin` or `user`.
    pub role: String,
    /// Plaintext demo password.
    pub password: String,
}

fn course(
    id: i64,
    title: &str,
    category: &str,
    price: f64,
    popularity: u8,
    tags: &[&str],
    description: &str,
) -> SeedCourse {
    SeedCourse {
        id,
        title: title.to_owned(),
        category: category.to_owned(),
        price,
        popularity,
        tags: tags.iter().map(|tag| (*tag).to_owned()).collect(),
        description: description.to_owned(),
    }
}

/// Fixed demo catalogue of twelve courses.
#[must_use]
pub fn demo_catalogue() -> Vec<SeedCourse> {
    vec![
        course(
            1001,
            "Основи веброзробки",
            "web",
            8500.0,
            92,
            &["HTML", "CSS", "JavaScript"],
            "HTML, CSS та перший інтерактивний застосунок.",
        ),
        course(
            1002,
            "React для початківців",
            "web",
            11200.0,
            88,
            &["React", "JavaScript", "frontend"],
            "Компоненти, стан і робота з API.",
        ),
        course(
            1003,
            "Node.js та Express",
            "web",
            10800.0,
            74,
            &["Node", "Express", "backend"],
            "REST-сервіси та робота з базами даних.",
        ),
        course(
            1004,
            "Python з нуля",
            "data",
            7900.0,
            95,
            &["Python", "backend"],
            "Синтаксис, колекції та перші скрипти.",
        ),
        course(
            1005,
            "Аналіз даних у Python",
            "data",
            13500.0,
            81,
            &["Python", "pandas", "data"],
            "Pandas, візуалізація та звіти.",
        ),
        course(
            1006,
            "Бази даних та SQL",
            "data",
            9200.0,
            77,
            &["SQL", "PostgreSQL"],
            "Моделювання схем і оптимізація запитів.",
        ),
        course(
            1007,
            "Розробка під Android",
            "mobile",
            12600.0,
            69,
            &["Kotlin", "Android"],
            "Kotlin, активності та публікація застосунку.",
        ),
        course(
            1008,
            "iOS та Swift",
            "mobile",
            13900.0,
            64,
            &["Swift", "iOS"],
            "SwiftUI і робота з сенсорами.",
        ),
        course(
            1009,
            "UI/UX дизайн",
            "design",
            8900.0,
            85,
            &["Figma", "UX"],
            "Прототипування і дизайн-системи у Figma.",
        ),
        course(
            1010,
            "Графічний дизайн",
            "design",
            7600.0,
            58,
            &["Illustrator", "branding"],
            "Композиція, типографіка та брендинг.",
        ),
        course(
            1011,
            "Тестування програмного забезпечення",
            "qa",
            6900.0,
            72,
            &["QA", "testing"],
            "Тест-кейси, баг-репорти й автоматизація.",
        ),
        course(
            1012,
            "DevOps практикум",
            "devops",
            14800.0,
            67,
            &["Docker", "CI/CD", "Linux"],
            "Контейнери, пайплайни та моніторинг.",
        ),
    ]
}

/// Demo accounts: one administrator and one regular user.
#[must_use]
pub fn demo_users() -> Vec<SeedUser> {
    vec![
        SeedUser {
            id: 1,
            name: "Олена Адміністратор".to_owned(),
            email: "admin@courses.ua".to_owned(),
            role: "admin".to_owned(),
            password: "admin12345".to_owned(),
        },
        SeedUser {
            id: 2,
            name: "Тарас Студент".to_owned(),
            email: "taras@courses.ua".to_owned(),
            role: "user".to_owned(),
            password: "password123".to_owned(),
        },
    ]
}
