//! Show a single blog post, as the blog reader view would

use anyhow::{anyhow, Result};

use crate::content::{markdown, BlogPost};
use crate::helpers::full_date;
use crate::Folio;

/// Print one blog post by slug
pub async fn run(folio: &Folio, slug: &str, html: bool) -> Result<()> {
    let posts = folio.load_blogs().await;
    let post = posts
        .iter()
        .find(|p| p.slug == slug)
        .ok_or_else(|| anyhow!("No blog post with slug '{}'", slug))?;

    println!("{}", render(post, &posts, html));
    Ok(())
}

/// Render a post with a header and prev/next links
pub fn render(post: &BlogPost, posts: &[BlogPost], html: bool) -> String {
    let body = if html {
        markdown::render_html(&post.content)
    } else {
        markdown::to_plain_text(&markdown::blocks(&post.content))
    };

    let mut header = vec![post.title.clone()];
    let mut meta = Vec::new();
    if let Some(date) = post.published() {
        meta.push(full_date(&date));
    } else if let Some(date) = &post.date {
        meta.push(date.clone());
    }
    if let Some(category) = &post.category {
        meta.push(category.clone());
    }
    if !meta.is_empty() {
        header.push(meta.join(" · "));
    }
    if !post.tags.is_empty() {
        header.push(format!("Tags: {}", post.tags.join(", ")));
    }

    let mut out = format!("{}\n\n{}\n", header.join("\n"), body.trim_end());

    let prev = post.prev(posts).map(|p| format!("Newer: {} [{}]", p.title, p.slug));
    let next = post.next(posts).map(|p| format!("Older: {} [{}]", p.title, p.slug));
    let nav: Vec<_> = prev.into_iter().chain(next).collect();
    if !nav.is_empty() {
        out.push('\n');
        out.push_str(&nav.join("\n"));
        out.push('\n');
    }

    out
}
