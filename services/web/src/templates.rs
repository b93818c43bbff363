//! HTML pages rendered with maud
//!
//! Every page goes through [`layout`], which draws the navigation for the
//! current authentication state and the pending flash message, if any.

use chrono::{DateTime, Datelike, Utc};
use maud::{DOCTYPE, Markup, html};

use crate::{
    forms::{PasswordUpdateForm, SnippetCreateForm, UserLoginForm, UserSignupForm},
    models::{Snippet, User},
    validator::Validator,
};

/// Values every page needs
#[derive(Debug, Clone, Default)]
pub struct TemplateData {
    pub current_year: i32,
    pub flash: Option<String>,
    pub is_authenticated: bool,
}

impl TemplateData {
    pub fn new(flash: Option<String>, is_authenticated: bool) -> Self {
        Self {
            current_year: Utc::now().year(),
            flash,
            is_authenticated,
        }
    }
}

/// "02 Jan 2006 at 15:04", in UTC
pub fn human_date(t: &DateTime<Utc>) -> String {
    t.format("%d %b %Y at %H:%M").to_string()
}

fn layout(title: &str, data: &TemplateData, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (title) " - Snippetbox" }
            }
            body {
                header {
                    h1 { a href="/" { "Snippetbox" } }
                }
                nav {
                    div {
                        a href="/" { "Home" }
                        a href="/about" { "About" }
                        @if data.is_authenticated {
                            a href="/snippet/create" { "Create snippet" }
                        }
                    }
                    div {
                        @if data.is_authenticated {
                            a href="/account/view" { "Account" }
                            form action="/user/logout" method="POST" {
                                button { "Logout" }
                            }
                        } @else {
                            a href="/user/signup" { "Signup" }
                            a href="/user/login" { "Login" }
                        }
                    }
                }
                main {
                    @if let Some(flash) = &data.flash {
                        div.flash { (flash) }
                    }
                    (content)
                }
                footer { "Powered by " a href="https://www.rust-lang.org/" { "Rust" } " in " (data.current_year) }
            }
        }
    }
}

fn field_error(validation: &Validator, field: &str) -> Markup {
    html! {
        @if let Some(message) = validation.field_error(field) {
            label.error { (message) }
        }
    }
}

fn non_field_errors(validation: &Validator) -> Markup {
    html! {
        @for message in &validation.non_field_errors {
            div.error { (message) }
        }
    }
}

pub fn home(data: &TemplateData, snippets: &[Snippet]) -> Markup {
    let content = html! {
        h2 { "Latest Snippets" }
        @if snippets.is_empty() {
            p { "There's nothing to see here... yet!" }
        } @else {
            table {
                tr {
                    th { "Title" }
                    th { "Created" }
                    th { "ID" }
                }
                @for snippet in snippets {
                    tr {
                        td { a href={ "/snippet/view/" (snippet.id) } { (snippet.title) } }
                        td { (human_date(&snippet.created)) }
                        td { "#" (snippet.id) }
                    }
                }
            }
        }
    };
    layout("Home", data, content)
}

pub fn view(data: &TemplateData, snippet: &Snippet) -> Markup {
    let content = html! {
        div.snippet {
            div.metadata {
                strong { (snippet.title) }
                span { "#" (snippet.id) }
            }
            pre { code { (snippet.content) } }
            div.metadata {
                time { "Created: " (human_date(&snippet.created)) }
                time { "Expires: " (human_date(&snippet.expires)) }
            }
        }
    };
    layout(&format!("Snippet #{}", snippet.id), data, content)
}

pub fn create(data: &TemplateData, form: &SnippetCreateForm) -> Markup {
    let v = &form.validation;
    let content = html! {
        form action="/snippet/create" method="POST" {
            div {
                label { "Title:" }
                (field_error(v, "title"))
                input type="text" name="title" value=(form.title);
            }
            div {
                label { "Content:" }
                (field_error(v, "content"))
                textarea name="content" { (form.content) }
            }
            div {
                label { "Delete in:" }
                (field_error(v, "expires"))
                input type="radio" name="expires" value="365" checked[form.expires == 365]; " One Year "
                input type="radio" name="expires" value="7" checked[form.expires == 7]; " One Week "
                input type="radio" name="expires" value="1" checked[form.expires == 1]; " One Day"
            }
            div {
                input type="submit" value="Publish snippet";
            }
        }
    };
    layout("Create a New Snippet", data, content)
}

pub fn signup(data: &TemplateData, form: &UserSignupForm) -> Markup {
    let v = &form.validation;
    let content = html! {
        form action="/user/signup" method="POST" novalidate {
            div {
                label { "Name:" }
                (field_error(v, "name"))
                input type="text" name="name" value=(form.name);
            }
            div {
                label { "Email:" }
                (field_error(v, "email"))
                input type="email" name="email" value=(form.email);
            }
            div {
                label { "Password:" }
                (field_error(v, "password"))
                input type="password" name="password";
            }
            div {
                input type="submit" value="Signup";
            }
        }
    };
    layout("Signup", data, content)
}

pub fn login(data: &TemplateData, form: &UserLoginForm) -> Markup {
    let v = &form.validation;
    let content = html! {
        form action="/user/login" method="POST" novalidate {
            (non_field_errors(v))
            div {
                label { "Email:" }
                (field_error(v, "email"))
                input type="email" name="email" value=(form.email);
            }
            div {
                label { "Password:" }
                (field_error(v, "password"))
                input type="password" name="password";
            }
            div {
                input type="submit" value="Login";
            }
        }
    };
    layout("Login", data, content)
}

pub fn account(data: &TemplateData, user: &User) -> Markup {
    let content = html! {
        h2 { "Your Account" }
        table {
            tr { th { "Name" } td { (user.name) } }
            tr { th { "Email" } td { (user.email) } }
            tr { th { "Joined" } td { (human_date(&user.created)) } }
            tr {
                th { "Password" }
                td { a href="/account/password/update" { "Change password" } }
            }
        }
    };
    layout("Your Account", data, content)
}

pub fn password(data: &TemplateData, form: &PasswordUpdateForm) -> Markup {
    let v = &form.validation;
    let content = html! {
        h2 { "Change Password" }
        form action="/account/password/update" method="POST" novalidate {
            div {
                label { "Current password:" }
                (field_error(v, "currentPassword"))
                input type="password" name="currentPassword";
            }
            div {
                label { "New password:" }
                (field_error(v, "newPassword"))
                input type="password" name="newPassword";
            }
            div {
                label { "Confirm new password:" }
                (field_error(v, "newPasswordConfirmation"))
                input type="password" name="newPasswordConfirmation";
            }
            div {
                input type="submit" value="Change password";
            }
        }
    };
    layout("Change Password", data, content)
}

pub fn about(data: &TemplateData) -> Markup {
    let content = html! {
        h2 { "About" }
        p {
            "Snippetbox is a place to paste and share short pieces of text. "
            "Snippets expire after a day, a week or a year."
        }
    };
    layout("About", data, content)
}
