use super::markup::escape;
use super::Component;
use crate::models::TestType;

/// One entry of the quiz navigation menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestLink {
    pub test_type: TestType,
    pub title: &'static str,
    pub route: String,
}

/// Static menu linking to each kind of quiz.
#[derive(Debug, Default, Clone, Copy)]
pub struct TestMenu;

impl TestMenu {
    pub fn links(&self) -> Vec<TestLink> {
        TestType::ALL
            .iter()
            .map(|test_type| TestLink {
                test_type: *test_type,
                title: test_type.title(),
                route: test_type.route(),
            })
            .collect()
    }
}

impl Component for TestMenu {
    fn render(&self) -> String {
        let links: String = self
            .links()
            .iter()
            .map(|link| {
                format!(
                    r#"<a class="link" href="{}"><div class="text-box"><div class="link-text">{}</div></div></a>"#,
                    escape(&link.route),
                    escape(link.title)
                )
            })
            .collect();
        format!(r#"<div class="test-container">{}</div>"#, links)
    }
}
