//! Blog post email rendering with Handlebars
//!
//! The HTML document is a single compiled template with inlined styles.
//! Every field goes through Handlebars' HTML escaping except `content`,
//! which is a pre-sanitized fragment rendered with `{{{content}}}`.
//! Subject and plain-text parts are assembled here, not templated, since
//! they are not markup.

use crate::error::{NotificationError, NotificationResult};
use crate::models::{BlogPost, SiteBranding};
use chrono::{Datelike, Utc};
use handlebars::Handlebars;
use serde_json::json;

const BLOG_POST_TEMPLATE: &str = "blog_post";

const BLOG_POST_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{title}}</title>
</head>
<body style="margin: 0; padding: 0; background-color: #f4f4f5; font-family: Arial, Helvetica, sans-serif; line-height: 1.6; color: #18181b;">
    <table role="presentation" width="100%" cellpadding="0" cellspacing="0" style="background-color: #f4f4f5; padding: 24px 0;">
        <tr>
            <td align="center">
                <table role="presentation" width="600" cellpadding="0" cellspacing="0" style="max-width: 600px; width: 100%; background-color: #ffffff; border-radius: 8px; overflow: hidden;">
{{#if cover_image}}
                    <tr>
                        <td>
                            <img src="{{cover_image}}" alt="{{title}}" width="600" style="display: block; width: 100%; height: auto; border: 0;">
                        </td>
                    </tr>
{{/if}}
                    <tr>
                        <td style="padding: 32px;">
                            <h1 style="margin: 0 0 16px; font-size: 26px; line-height: 1.3; color: #18181b;">{{title}}</h1>
{{#if excerpt}}
                            <p class="excerpt" style="margin: 0 0 24px; font-size: 17px; font-style: italic; color: #52525b;">{{excerpt}}</p>
{{/if}}
                            <div style="font-size: 16px; color: #27272a;">{{{content}}}</div>
                            <p style="margin: 32px 0 0; text-align: center;">
                                <a href="{{post_url}}" style="background-color: #2563eb; color: #ffffff; padding: 12px 24px; text-decoration: none; border-radius: 6px; display: inline-block; font-weight: bold;">Read the full post</a>
                            </p>
                        </td>
                    </tr>
                    <tr>
                        <td style="padding: 16px 32px; background-color: #fafafa; font-size: 12px; color: #71717a; text-align: center;">
                            &copy; {{year}} <a href="{{site_url}}" style="color: #71717a;">{{site_name}}</a>. You are receiving this email because you subscribed to updates.
                        </td>
                    </tr>
                </table>
            </td>
        </tr>
    </table>
</body>
</html>
"#;

/// Rendered parts of one notification email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTemplate {
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

/// Handlebars-based renderer for blog post notifications
///
/// Rendering is a pure function of the post, the branding and the year.
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
    branding: SiteBranding,
}

impl TemplateEngine {
    /// Compile the blog post template.
    pub fn new(branding: SiteBranding) -> NotificationResult<Self> {
        let mut handlebars = Handlebars::new();
        handlebars
            .register_template_string(BLOG_POST_TEMPLATE, BLOG_POST_HTML)
            .map_err(|e| NotificationError::Template(format!("Failed to register template: {}", e)))?;

        Ok(Self {
            handlebars,
            branding,
        })
    }

    pub fn branding(&self) -> &SiteBranding {
        &self.branding
    }

    /// Render with the current UTC year in the footer.
    pub fn render(&self, post: &BlogPost) -> NotificationResult<RenderedTemplate> {
        self.render_at(post, Utc::now().year())
    }

    /// Render with an explicit footer year.
    pub fn render_at(&self, post: &BlogPost, year: i32) -> NotificationResult<RenderedTemplate> {
        let post_url = self.branding.post_url(post.slug.as_deref());
        // Blank excerpts are left out of both parts.
        let excerpt = post.excerpt.as_deref().filter(|e| !e.trim().is_empty());

        let data = json!({
            "title": post.title,
            "excerpt": excerpt,
            "content": post.content,
            "cover_image": post.cover_image,
            "post_url": post_url,
            "site_name": self.branding.site_name,
            "site_url": self.branding.site_url,
            "year": year,
        });

        let html_body = self.handlebars.render(BLOG_POST_TEMPLATE, &data)?;

        Ok(RenderedTemplate {
            subject: format!("New post: {}", post.title),
            html_body,
            text_body: text_body(&post.title, excerpt, &post_url, &self.branding, year),
        })
    }
}

fn text_body(
    title: &str,
    excerpt: Option<&str>,
    post_url: &str,
    branding: &SiteBranding,
    year: i32,
) -> String {
    let mut text = format!("{}\n\n", title);
    if let Some(excerpt) = excerpt {
        text.push_str(excerpt);
        text.push_str("\n\n");
    }
    text.push_str(&format!("Read the full post: {}\n\n", post_url));
    text.push_str(&format!("(c) {} {}\n", year, branding.site_name));
    text
}
