//! Course list page for the signed-in user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Shown for every route once a session exists. The list itself is owned by
//! the controller; this page only renders it and forwards logout/refresh.

#[cfg(test)]
#[path = "courses_test.rs"]
mod courses_test;

use leptos::prelude::*;

use crate::net::types::Course;

/// Caption above the list for its current fetch state.
pub(crate) fn list_caption(courses: Option<&[Course]>) -> String {
    match courses {
        None => "Courses not loaded yet.".to_owned(),
        Some([]) => "No courses available.".to_owned(),
        Some([_]) => "1 course".to_owned(),
        Some(list) => format!("{} courses", list.len()),
    }
}

#[component]
pub fn CoursesPage(
    #[prop(into)] courses: Signal<Option<Vec<Course>>>,
    #[prop(into)] user_email: Signal<String>,
    on_log_out: Callback<()>,
    on_refresh: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="courses-page">
            <header class="courses-page__header toolbar">
                <span class="toolbar__title">"Courses"</span>
                <span class="toolbar__spacer"></span>
                <span class="toolbar__self">{move || user_email.get()}</span>
                <button class="btn toolbar__refresh" on:click=move |_| on_refresh.run(()) title="Refresh">
                    "Refresh"
                </button>
                <button class="btn toolbar__logout" on:click=move |_| on_log_out.run(()) title="Logout">
                    "Logout"
                </button>
            </header>
            <p class="courses-page__caption">{move || courses.with(|c| list_caption(c.as_deref()))}</p>
            <ul class="courses-page__list">
                {move || {
                    courses
                        .get()
                        .unwrap_or_default()
                        .into_iter()
                        .map(|course| {
                            let description = course.description().map(str::to_owned);
                            view! {
                                <li class="course-card">
                                    <h2 class="course-card__title">{course.title().to_owned()}</h2>
                                    {description.map(|d| view! { <p class="course-card__description">{d}</p> })}
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
        </div>
    }
}
