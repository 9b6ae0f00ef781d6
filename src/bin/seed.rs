//! Provisions the demo student, two courses and their enrollments.
//! Safe to run repeatedly.

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, Postgres, Transaction};
use uuid::Uuid;

use masomohub::auth::password::{hash_password, needs_rehash};

struct SeedCourse {
    title: &'static str,
    category: &'static str,
    total_units: i32,
    mentor_name: &'static str,
    mentor_avatar: &'static str,
    image: &'static str,
    progress: i32,
    completed_units: i32,
}

const COURSES: &[SeedCourse] = &[
    SeedCourse {
        title: "UI/UX Design Fundamentals",
        category: "UI/UX",
        total_units: 8,
        mentor_name: "Padhang Satrio",
        mentor_avatar: "https://i.pravatar.cc/150?u=padhang",
        image: "https://picsum.photos/seed/course1/400/250",
        progress: 25,
        completed_units: 2,
    },
    SeedCourse {
        title: "Advanced React Patterns",
        category: "Frontend",
        total_units: 10,
        mentor_name: "Zakir Horizontal",
        mentor_avatar: "https://i.pravatar.cc/150?u=zakir",
        image: "https://picsum.photos/seed/course2/400/250",
        progress: 40,
        completed_units: 4,
    },
];

const SEED_EMAIL: &str = "admin@masomo.com";
const SEED_PASSWORD: &str = "123456";

/// Current hash of the seed user, if the row exists.
async fn stored_hash(tx: &mut Transaction<'_, Postgres>) -> anyhow::Result<Option<String>> {
    let row: Option<(String,)> = sqlx::query_as("SELECT password_hash FROM users WHERE email = $1")
        .bind(SEED_EMAIL)
        .fetch_optional(&mut **tx)
        .await
        .context("look up user")?;
    Ok(row.map(|(h,)| h))
}

async fn upsert_user(tx: &mut Transaction<'_, Postgres>, password_hash: &str) -> anyhow::Result<Uuid> {
    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (email, password_hash, name, role, avatar)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (email) DO UPDATE SET password_hash = EXCLUDED.password_hash
        RETURNING id
        "#,
    )
    .bind(SEED_EMAIL)
    .bind(password_hash)
    .bind("Alex Johnson")
    .bind("Student")
    .bind("https://i.pravatar.cc/150?u=alex")
    .fetch_one(&mut **tx)
    .await
    .context("upsert user")?;
    Ok(id)
}

async fn find_or_create_course(tx: &mut Transaction<'_, Postgres>, c: &SeedCourse) -> anyhow::Result<Uuid> {
    let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM courses WHERE title = $1 LIMIT 1")
        .bind(c.title)
        .fetch_optional(&mut **tx)
        .await
        .context("look up course")?;
    if let Some((id,)) = existing {
        return Ok(id);
    }

    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO courses (title, category, mentor_name, mentor_avatar, total_units, image)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id
        "#,
    )
    .bind(c.title)
    .bind(c.category)
    .bind(c.mentor_name)
    .bind(c.mentor_avatar)
    .bind(c.total_units)
    .bind(c.image)
    .fetch_one(&mut **tx)
    .await
    .with_context(|| format!("insert course {}", c.title))?;
    Ok(id)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    masomohub::init_tracing("seed=info,masomohub=info");

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL")?;
    let db = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
        .context("connect to database")?;

    sqlx::migrate!("./migrations").run(&db).await.context("run migrations")?;

    let mut tx = db.begin().await.context("begin tx")?;

    let existing = stored_hash(&mut tx).await?;
    let password_hash = match existing {
        Some(hash) if !needs_rehash(SEED_PASSWORD, Some(&hash)) => hash,
        _ => {
            tracing::info!("storing fresh password hash");
            hash_password(SEED_PASSWORD)?
        }
    };
    let user_id = upsert_user(&mut tx, &password_hash).await?;
    tracing::info!(%user_id, "user ready");

    for c in COURSES {
        let course_id = find_or_create_course(&mut tx, c).await?;
        sqlx::query(
            r#"
            INSERT INTO enrollments (user_id, course_id, progress, completed_units)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, course_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(course_id)
        .bind(c.progress)
        .bind(c.completed_units)
        .execute(&mut *tx)
        .await
        .context("insert enrollment")?;
        tracing::info!(%course_id, title = c.title, "enrollment ready");
    }

    tx.commit().await.context("commit tx")?;
    db.close().await;
    tracing::info!("seeding finished");
    Ok(())
}
