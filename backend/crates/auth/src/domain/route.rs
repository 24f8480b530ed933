//! Route table
//!
//! Static mapping from a location path to a view. The only input besides the
//! path is a [`RouteTarget`], computed once from session state, so the table
//! itself stays a pure function.

use serde::Serialize;

use crate::domain::user_type::UserType;

/// Where a signed-in visitor should be sent from `/` and `/login`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RouteTarget {
    /// Signed out, or the one automatic redirect already happened
    Anonymous,
    Home,
    StudentLanding,
    StaffLanding,
}

impl RouteTarget {
    /// Pending redirect for a signed-in visitor of `user_type`
    pub fn for_user_type(user_type: UserType) -> Self {
        match user_type {
            UserType::Student => RouteTarget::StudentLanding,
            UserType::Staff => RouteTarget::StaffLanding,
            UserType::Admin | UserType::Unknown => RouteTarget::Home,
        }
    }

    pub const fn landing_path(&self) -> &'static str {
        match self {
            RouteTarget::Anonymous | RouteTarget::Home => "/home",
            RouteTarget::StudentLanding => UserType::Student.landing_path(),
            RouteTarget::StaffLanding => UserType::Staff.landing_path(),
        }
    }
}

/// Who may see a view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Access {
    Public,
    /// Generic authenticated guard
    User,
    /// Token-validating admin guard
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "name", rename_all = "kebab-case")]
pub enum View {
    Home,
    AiArticle,
    AiWork,
    GenAi,
    Workflow,
    Contact,
    Tools,
    PostDetail { id: String },
    Login,
    Profile,
    SpecialBlog,
    StudentDashboard,
    StaffDashboard,
    AdminLogin,
    AdminUpload,
    AdminDashboard,
    AdUplink,
    LinkUpload,
    NotFound,
}

impl View {
    pub fn access(&self) -> Access {
        use View::*;
        match self {
            Profile | SpecialBlog | StudentDashboard | StaffDashboard => Access::User,
            AdminUpload | AdminDashboard | AdUplink | LinkUpload => Access::Admin,
            _ => Access::Public,
        }
    }
}

/// Result of looking a path up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteEntry {
    Render(View),
    /// Immediate replace-navigation
    Redirect(&'static str),
}

const STATIC_ROUTES: &[(&str, View)] = &[
    ("/home", View::Home),
    ("/ai-article", View::AiArticle),
    ("/ai-work", View::AiWork),
    ("/gen-ai", View::GenAi),
    ("/workflow", View::Workflow),
    ("/contact", View::Contact),
    ("/tools", View::Tools),
    ("/profile", View::Profile),
    ("/admin-login", View::AdminLogin),
    ("/admin-uplode", View::AdminUpload),
    ("/admin-dashboard", View::AdminDashboard),
    ("/AdUplink", View::AdUplink),
    ("/Linkuplode", View::LinkUpload),
    ("/special-blog", View::SpecialBlog),
    ("/student-dash", View::StudentDashboard),
    ("/staff-dash", View::StaffDashboard),
];

/// Strip query, fragment and trailing slashes
pub fn normalize_path(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// Look up `path`. Matching ignores ASCII case like the shell's router.
pub fn route_table(path: &str, target: RouteTarget) -> RouteEntry {
    let path = normalize_path(path);

    if path == "/" {
        return RouteEntry::Redirect(target.landing_path());
    }

    if path.eq_ignore_ascii_case("/login") {
        return match target {
            RouteTarget::Anonymous => RouteEntry::Render(View::Login),
            other => RouteEntry::Redirect(other.landing_path()),
        };
    }

    if let Some((_, view)) = STATIC_ROUTES
        .iter()
        .find(|(route, _)| route.eq_ignore_ascii_case(path))
    {
        return RouteEntry::Render(view.clone());
    }

    match strip_prefix_ignore_case(path, "/post/") {
        Some(id) if !id.is_empty() && !id.contains('/') => {
            RouteEntry::Render(View::PostDetail { id: id.to_string() })
        }
        _ => RouteEntry::Render(View::NotFound),
    }
}

fn strip_prefix_ignore_case<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    let head = path.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &path[prefix.len()..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_redirects_by_target() {
        assert_eq!(
            route_table("/", RouteTarget::Anonymous),
            RouteEntry::Redirect("/home")
        );
        assert_eq!(
            route_table("/", RouteTarget::StudentLanding),
            RouteEntry::Redirect("/student-dash")
        );
        assert_eq!(
            route_table("/", RouteTarget::StaffLanding),
            RouteEntry::Redirect("/staff-dash")
        );
        assert_eq!(route_table("/", RouteTarget::Home), RouteEntry::Redirect("/home"));
    }

    #[test]
    fn test_login_route() {
        assert_eq!(
            route_table("/login", RouteTarget::Anonymous),
            RouteEntry::Render(View::Login)
        );
        assert_eq!(
            route_table("/login", RouteTarget::StaffLanding),
            RouteEntry::Redirect("/staff-dash")
        );
        assert_eq!(
            route_table("/login", RouteTarget::Home),
            RouteEntry::Redirect("/home")
        );
    }

    #[test]
    fn test_guarded_views() {
        let access = |path| match route_table(path, RouteTarget::Anonymous) {
            RouteEntry::Render(view) => view.access(),
            RouteEntry::Redirect(_) => panic!("unexpected redirect"),
        };
        assert_eq!(access("/profile"), Access::User);
        assert_eq!(access("/student-dash"), Access::User);
        assert_eq!(access("/admin-dashboard"), Access::Admin);
        assert_eq!(access("/Linkuplode"), Access::Admin);
        assert_eq!(access("/tools"), Access::Public);
        assert_eq!(access("/admin-login"), Access::Public);
    }

    #[test]
    fn test_case_and_trailing_slash() {
        assert_eq!(
            route_table("/aduplink/", RouteTarget::Anonymous),
            RouteEntry::Render(View::AdUplink)
        );
        assert_eq!(
            route_table("/HOME?tab=1", RouteTarget::Anonymous),
            RouteEntry::Render(View::Home)
        );
    }

    #[test]
    fn test_post_detail() {
        assert_eq!(
            route_table("/post/42", RouteTarget::Anonymous),
            RouteEntry::Render(View::PostDetail { id: "42".into() })
        );
        assert_eq!(
            route_table("/post/", RouteTarget::Anonymous),
            RouteEntry::Render(View::NotFound)
        );
        assert_eq!(
            route_table("/post/1/2", RouteTarget::Anonymous),
            RouteEntry::Render(View::NotFound)
        );
    }

    #[test]
    fn test_unknown_path() {
        assert_eq!(
            route_table("/nope", RouteTarget::Anonymous),
            RouteEntry::Render(View::NotFound)
        );
    }

    #[test]
    fn test_view_serializes_with_name_tag() {
        let json = serde_json::to_value(View::PostDetail { id: "9".into() }).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "post-detail", "id": "9" }));
        let json = serde_json::to_value(View::StudentDashboard).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "student-dashboard" }));
    }

    #[test]
    fn test_target_from_user_type() {
        assert_eq!(
            RouteTarget::for_user_type(UserType::Student),
            RouteTarget::StudentLanding
        );
        assert_eq!(RouteTarget::for_user_type(UserType::Unknown), RouteTarget::Home);
    }
}
