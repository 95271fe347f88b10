//! HTML views.
//!
//! Pure functions from view data to markup. Form field names here are the
//! wire contract of the POST routes.

use maud::{html, Markup, DOCTYPE};
use todolist_core::Item;

/// Renders a list titled `title` with its items, one delete form per item,
/// and the add-item form.
pub fn list_page(title: &str, items: &[Item]) -> Markup {
    layout(
        title,
        html! {
            div.box #heading {
                h1 { (title) }
            }
            div.box {
                @for item in items {
                    form action="/delete" method="post" {
                        div.item {
                            input type="checkbox" name="checkbox" value=(item.id.to_string()) onchange="this.form.submit()";
                            p { (item.name) }
                        }
                        input type="hidden" name="listName" value=(title);
                    }
                }
                form.item action="/" method="post" {
                    input type="text" name="newItem" placeholder="New Item" autocomplete="off";
                    button type="submit" name="list" value=(title) { "+" }
                }
            }
        },
    )
}

pub fn about_page() -> Markup {
    layout(
        "About",
        html! {
            div.box #heading {
                h1 { "About" }
            }
            div.box {
                p {
                    "A small to-do list. The default list lives at "
                    a href="/" { "/" }
                    "; any other path opens a list of that name, created on first visit."
                }
            }
        },
    )
}

fn layout(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "To-Do List - " (title) }
                link rel="stylesheet" href="/css/styles.css";
            }
            body {
                (body)
                footer.footer {
                    a href="/about" { "About" }
                }
            }
        }
    }
}
