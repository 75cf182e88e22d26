use serde::{Deserialize, Serialize};

/// A blog entry with its owner populated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blog {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub author: String,
    pub url: String,
    #[serde(default)]
    pub likes: i64,
    pub user: Option<BlogOwner>,
}

/// The user who created a blog, as embedded in blog responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogOwner {
    pub username: String,
    pub name: Option<String>,
    pub id: String,
}

/// Short form of a blog embedded in user responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogSummary {
    pub url: String,
    pub title: String,
    pub author: String,
    pub id: String,
}

/// User record stored in database
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub username: String,
    pub name: Option<String>,
    pub password_hash: String,
}

/// Public user info (no sensitive data)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub username: String,
    pub name: Option<String>,
    pub id: String,
    pub blogs: Vec<BlogSummary>,
}

impl User {
    pub fn into_info(self, blogs: Vec<BlogSummary>) -> UserInfo {
        UserInfo {
            username: self.username,
            name: self.name,
            id: self.id,
            blogs,
        }
    }
}

/// Body of `POST /api/blogs`; required fields are checked by `BlogManager`
#[derive(Debug, Default, Deserialize)]
pub struct NewBlog {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

/// Body of `PUT /api/blogs/{id}`; absent fields are left untouched
#[derive(Debug, Default, Deserialize)]
pub struct BlogUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

/// Body of `POST /api/users`
#[derive(Debug, Default, Deserialize)]
pub struct NewUser {
    pub username: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub name: Option<String>,
}
