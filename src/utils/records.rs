// This file contains the fixed, read-only record tables served by the site.
#![forbid(unsafe_code)]

use lazy_static::lazy_static;
use poem_openapi::Object;
use serde::Serialize;

// ***************************************************************************
//                             Static Variables
// ***************************************************************************
// Both tables are built once on first use and never mutated afterwards, so
// handlers share them without locking.
lazy_static! {
    static ref USERS: Vec<User> = vec![
        User::new(1, "Alice", "alice@example.com"),
        User::new(2, "Bob", "bob@example.com"),
        User::new(3, "Charlie", "charlie@example.com"),
    ];

    static ref ARTICLES: Vec<Article> = vec![
        Article::new(
            "mon-premier-article",
            "Mon Premier Article",
            "Bienvenue sur mon blog Next.js ! Ceci est un exemple de route dynamique.",
            "2025-01-15",
        ),
        Article::new(
            "apprendre-nextjs",
            "Apprendre Next.js",
            "Next.js est un framework React incroyable pour créer des applications web modernes.",
            "2025-01-16",
        ),
        Article::new(
            "server-components",
            "Les Server Components",
            "Les Server Components révolutionnent la façon dont nous construisons des applications React.",
            "2025-01-17",
        ),
    ];
}

// ---------------------------------------------------------------------------
// users:
// ---------------------------------------------------------------------------
#[derive(Object, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl User {
    fn new(id: i64, name: &str, email: &str) -> Self {
        User { id, name: name.to_string(), email: email.to_string() }
    }
}

// ---------------------------------------------------------------------------
// articles:
// ---------------------------------------------------------------------------
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub slug: String,
    pub title: String,
    pub content: String,
    pub date: String,
}

impl Article {
    fn new(slug: &str, title: &str, content: &str, date: &str) -> Self {
        Article {
            slug: slug.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            date: date.to_string(),
        }
    }
}

// ***************************************************************************
//                             Lookup Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// find_user:
// ---------------------------------------------------------------------------
/** Look up a user by the raw path segment.  Only the leading integer of the
 * segment counts, so "2.0" and "1abc" resolve while "abc" matches nothing.
 */
pub fn find_user(id: &str) -> Option<&'static User> {
    let id = parse_leading_int(id)?;
    USERS.iter().find(|u| u.id == id)
}

// ---------------------------------------------------------------------------
// find_article:
// ---------------------------------------------------------------------------
/** Exact, case-sensitive slug lookup. */
pub fn find_article(slug: &str) -> Option<&'static Article> {
    ARTICLES.iter().find(|a| a.slug == slug)
}

// ---------------------------------------------------------------------------
// all_articles:
// ---------------------------------------------------------------------------
pub fn all_articles() -> &'static [Article] {
    &ARTICLES
}

// ---------------------------------------------------------------------------
// article_slugs:
// ---------------------------------------------------------------------------
/** Every valid slug in table order, used to pre-generate the blog pages. */
pub fn article_slugs() -> Vec<&'static str> {
    ARTICLES.iter().map(|a| a.slug.as_str()).collect()
}

// ***************************************************************************
//                             Private Functions
// ***************************************************************************
/** Skip leading whitespace, then read an optional sign and the run of ASCII
 * digits after it.  Trailing text is ignored.  None if there are no digits.
 */
fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let sign_len = if s.starts_with('+') || s.starts_with('-') { 1 } else { 0 };
    let digits = s[sign_len..].bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    s[..sign_len + digits].parse().ok()
}
