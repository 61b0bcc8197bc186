use serde::Serialize;

use crate::models::Role;

#[derive(Debug, Serialize, Clone)]
pub struct MenuItem {
    pub label: &'static str,
    pub path: &'static str,
    pub icon: &'static str,
}

const fn item(label: &'static str, path: &'static str, icon: &'static str) -> MenuItem {
    MenuItem { label, path, icon }
}

lazy_static::lazy_static! {
    static ref STUDENT_MENU: Vec<MenuItem> = vec![
        item("Home", "/student", "home"),
        item("Events", "/student/events", "calendar"),
        item("My Registrations", "/student/registrations", "ticket"),
        item("FAQs", "/faqs", "help-circle"),
        item("Profile", "/profile", "user"),
    ];

    static ref TEACHER_MENU: Vec<MenuItem> = vec![
        item("Dashboard", "/teacher", "home"),
        item("My Events", "/teacher/events", "calendar"),
        item("FAQs", "/teacher/faqs", "help-circle"),
        item("Inbox", "/teacher/inbox", "mail"),
        item("Profile", "/profile", "user"),
    ];
}

/// Selects the menu for the current role. No session renders nothing;
/// redirecting unauthenticated visitors is the guard's job, not the menu's.
pub fn menu_for(role: Option<Role>) -> &'static [MenuItem] {
    match role {
        Some(Role::Student) => &STUDENT_MENU,
        Some(Role::Teacher) => &TEACHER_MENU,
        None => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menus_per_role() {
        let student = menu_for(Some(Role::Student));
        assert!(student.iter().any(|m| m.path == "/student/registrations"));
        assert!(student.iter().all(|m| !m.path.starts_with("/teacher")));

        let teacher = menu_for(Some(Role::Teacher));
        assert!(teacher.iter().any(|m| m.path == "/teacher/inbox"));
        assert!(teacher.iter().all(|m| !m.path.starts_with("/student")));
    }

    #[test]
    fn test_no_session_renders_nothing() {
        assert!(menu_for(None).is_empty());
    }
}
