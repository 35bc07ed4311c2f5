//! List site content

use anyhow::Result;
use std::collections::HashMap;

use crate::content::{BlogPost, Testimonial};
use crate::helpers::iso_date;
use crate::Folio;

/// List site content by type
pub async fn run(folio: &Folio, content_type: &str) -> Result<()> {
    let output = match content_type {
        "blog" | "blogs" | "post" | "posts" => format_blogs(&folio.load_blogs().await),
        "testimonial" | "testimonials" => format_testimonials(&folio.load_testimonials().await),
        "tag" | "tags" => {
            let posts = folio.load_blogs().await;
            format_counts("Tags", posts.iter().flat_map(|p| p.tags.iter()))
        }
        "category" | "categories" => {
            let posts = folio.load_blogs().await;
            format_counts(
                "Categories",
                posts.iter().filter_map(|p| p.category.as_ref()),
            )
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: blog, testimonial, tag, category",
                content_type
            );
        }
    };

    print!("{}", output);
    Ok(())
}

fn format_blogs(posts: &[BlogPost]) -> String {
    let mut out = format!("Blogs ({}):\n", posts.len());
    for post in posts {
        let date = post
            .published()
            .map(|d| iso_date(&d))
            .unwrap_or_else(|| "undated   ".to_string());
        out.push_str(&format!("  {} - {} [{}]\n", date, post.title, post.slug));
    }
    out
}

fn format_testimonials(testimonials: &[Testimonial]) -> String {
    let mut out = format!("Testimonials ({}):\n", testimonials.len());
    for t in testimonials {
        let id = t.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
        let name = t.name.as_deref().unwrap_or("Anonymous");
        match &t.role {
            Some(role) => out.push_str(&format!("  {:>3}. {} ({}) [{}]\n", id, name, role, t.slug)),
            None => out.push_str(&format!("  {:>3}. {} [{}]\n", id, name, t.slug)),
        }
    }
    out
}

/// Count occurrences, most frequent first, ties by name
fn format_counts<'a>(label: &str, names: impl Iterator<Item = &'a String>) -> String {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for name in names {
        *counts.entry(name.as_str()).or_insert(0) += 1;
    }

    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut out = format!("{} ({}):\n", label, counts.len());
    for (name, count) in counts {
        out.push_str(&format!("  {} ({})\n", name, count));
    }
    out
}
