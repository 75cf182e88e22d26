//! Blog storage
//!
//! CRUD over the `blogs` table. Every read joins the owning user so
//! responses carry `{ username, name, id }` for the creator.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::ctx::Ctx;
use crate::error::{Error, Result};
use crate::models::{Blog, BlogOwner, BlogUpdate, NewBlog};

const SELECT_BLOGS: &str = r#"
    SELECT b.id, b.title, b.author, b.url, b.likes, b.user_id, u.username, u.name
    FROM blogs b
    LEFT JOIN users u ON b.user_id = u.id
"#;

type BlogRow = (
    String,
    String,
    String,
    String,
    i64,
    Option<String>,
    Option<String>,
    Option<String>,
);

pub struct BlogManager {
    pool: SqlitePool,
}

impl BlogManager {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All blogs in insertion order
    pub async fn list(&self) -> Result<Vec<Blog>> {
        let rows: Vec<BlogRow> = sqlx::query_as(&format!("{} ORDER BY b.rowid", SELECT_BLOGS))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(blog_from_row).collect())
    }

    pub async fn get(&self, id: &str) -> Result<Blog> {
        parse_id(id)?;
        self.fetch(id).await?.ok_or(Error::BlogNotFound)
    }

    /// Store a new blog owned by the caller
    pub async fn create(&self, input: NewBlog, owner: &Ctx) -> Result<Blog> {
        let title = required(input.title, "title missing")?;
        let url = required(input.url, "url missing")?;
        let author = input.author.unwrap_or_default();
        let likes = input.likes.unwrap_or(0);

        let id = Uuid::new_v4().to_string();

        sqlx::query(
            "INSERT INTO blogs (id, title, author, url, likes, user_id, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&title)
        .bind(&author)
        .bind(&url)
        .bind(likes)
        .bind(owner.user_id())
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        info!("[Blogs] {} added \"{}\"", owner.username(), title);

        self.fetch(&id).await?.ok_or(Error::BlogNotFound)
    }

    /// Apply the fields present in `patch`, leaving the rest untouched
    pub async fn update(&self, id: &str, patch: BlogUpdate) -> Result<Blog> {
        parse_id(id)?;

        if matches!(patch.title.as_deref(), Some(t) if t.trim().is_empty()) {
            return Err(Error::Validation("title missing".to_string()));
        }
        if matches!(patch.url.as_deref(), Some(u) if u.trim().is_empty()) {
            return Err(Error::Validation("url missing".to_string()));
        }

        let result = sqlx::query(
            r#"
            UPDATE blogs SET
                title = COALESCE(?, title),
                author = COALESCE(?, author),
                url = COALESCE(?, url),
                likes = COALESCE(?, likes)
            WHERE id = ?
            "#,
        )
        .bind(patch.title)
        .bind(patch.author)
        .bind(patch.url)
        .bind(patch.likes)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::BlogNotFound);
        }

        self.fetch(id).await?.ok_or(Error::BlogNotFound)
    }

    /// Delete a blog; only its creator may do so
    pub async fn delete(&self, id: &str, requester: &Ctx) -> Result<()> {
        parse_id(id)?;

        let owner: Option<(Option<String>,)> =
            sqlx::query_as("SELECT user_id FROM blogs WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        let (owner_id,) = owner.ok_or(Error::BlogNotFound)?;

        if owner_id.as_deref() != Some(requester.user_id()) {
            warn!(
                "[Blogs] {} tried to delete blog {} owned by {:?}",
                requester.username(),
                id,
                owner_id
            );
            return Err(Error::NotBlogOwner);
        }

        sqlx::query("DELETE FROM blogs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        info!("[Blogs] {} deleted blog {}", requester.username(), id);

        Ok(())
    }

    /// Remove every blog
    pub async fn delete_all(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM blogs").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn fetch(&self, id: &str) -> Result<Option<Blog>> {
        let row: Option<BlogRow> = sqlx::query_as(&format!("{} WHERE b.id = ?", SELECT_BLOGS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(blog_from_row))
    }
}

fn parse_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).map_err(|_| Error::MalformattedId)
}

fn required(value: Option<String>, message: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::Validation(message.to_string())),
    }
}

fn blog_from_row(
    (id, title, author, url, likes, user_id, username, name): BlogRow,
) -> Blog {
    let user = match (user_id, username) {
        (Some(id), Some(username)) => Some(BlogOwner { username, name, id }),
        _ => None,
    };

    Blog {
        id,
        title,
        author,
        url,
        likes,
        user,
    }
}
