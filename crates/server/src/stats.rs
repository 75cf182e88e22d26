//! Aggregations over a list of blogs
//!
//! Pure functions, no storage access. Ties always resolve to the entry
//! that appears first in the input.

use crate::models::Blog;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteBlog {
    pub title: String,
    pub author: String,
    pub likes: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorBlogs {
    pub author: String,
    pub blogs: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorLikes {
    pub author: String,
    pub likes: i64,
}

/// Response body of `GET /api/stats`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogStats {
    pub total_likes: i64,
    pub favorite_blog: Option<FavoriteBlog>,
    pub most_blogs: Option<AuthorBlogs>,
    pub most_likes: Option<AuthorLikes>,
}

pub fn total_likes(blogs: &[Blog]) -> i64 {
    blogs.iter().map(|blog| blog.likes).sum()
}

pub fn favorite_blog(blogs: &[Blog]) -> Option<FavoriteBlog> {
    let first = blogs.first()?;
    let favorite = blogs
        .iter()
        .fold(first, |best, blog| if blog.likes > best.likes { blog } else { best });

    Some(FavoriteBlog {
        title: favorite.title.clone(),
        author: favorite.author.clone(),
        likes: favorite.likes,
    })
}

pub fn most_blogs(blogs: &[Blog]) -> Option<AuthorBlogs> {
    let (author, blogs) = top_author(blogs, |_| 1usize)?;
    Some(AuthorBlogs { author, blogs })
}

pub fn most_likes(blogs: &[Blog]) -> Option<AuthorLikes> {
    let (author, likes) = top_author(blogs, |blog| blog.likes)?;
    Some(AuthorLikes { author, likes })
}

pub fn summarize(blogs: &[Blog]) -> BlogStats {
    BlogStats {
        total_likes: total_likes(blogs),
        favorite_blog: favorite_blog(blogs),
        most_blogs: most_blogs(blogs),
        most_likes: most_likes(blogs),
    }
}

/// Sum `weight` per author and pick the largest total.
///
/// Authors are kept in first-seen order so a tie goes to whoever
/// appeared earliest.
fn top_author<T, F>(blogs: &[Blog], weight: F) -> Option<(String, T)>
where
    T: Copy + PartialOrd + std::ops::Add<Output = T>,
    F: Fn(&Blog) -> T,
{
    let mut totals: Vec<(&str, T)> = Vec::new();
    for blog in blogs {
        let w = weight(blog);
        match totals.iter_mut().find(|(author, _)| *author == blog.author) {
            Some((_, total)) => *total = *total + w,
            None => totals.push((blog.author.as_str(), w)),
        }
    }

    let mut iter = totals.into_iter();
    let first = iter.next()?;
    let (author, total) = iter.fold(first, |best, entry| if entry.1 > best.1 { entry } else { best });
    Some((author.to_string(), total))
}
