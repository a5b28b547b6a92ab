use glam::Vec3;

/// Text and placement of one billboard.
#[derive(Debug, Clone, PartialEq)]
pub struct BillboardContent {
    /// Stable identifier.
    pub id: String,
    /// Heading drawn large at the top of the screen.
    pub title: String,
    /// Body text, word-wrapped under the title.
    pub body: String,
    /// World position of the screen center.
    pub position: Vec3,
}

impl BillboardContent {
    /// Build a content record.
    #[must_use]
    pub fn new(id: &str, title: &str, body: &str, position: Vec3) -> Self {
        Self {
            id: id.to_owned(),
            title: title.to_owned(),
            body: body.to_owned(),
            position,
        }
    }
}

/// The showcase's eight billboards, alternating sides of the road.
#[must_use]
pub fn default_contents() -> Vec<BillboardContent> {
    vec![
        BillboardContent::new(
            "billboard-1",
            "Universal Design",
            "Design for everyone, not just the average user. When we build for diversity, everyone benefits.",
            Vec3::new(-15.0, 8.0, -30.0),
        ),
        BillboardContent::new(
            "billboard-2",
            "Perceivable",
            "Information must be presentable in ways all users can perceive. Use alt text, captions, and sufficient contrast.",
            Vec3::new(20.0, 10.0, -80.0),
        ),
        BillboardContent::new(
            "billboard-3",
            "Operable",
            "All functionality must be available via keyboard. No mouse required. Everyone can navigate.",
            Vec3::new(-25.0, 12.0, -150.0),
        ),
        BillboardContent::new(
            "billboard-4",
            "Understandable",
            "Content should be readable and predictable. Clear language, consistent navigation, helpful error messages.",
            Vec3::new(18.0, 9.0, -220.0),
        ),
        BillboardContent::new(
            "billboard-5",
            "Robust",
            "Build with semantic HTML. Works with assistive technologies today and tomorrow.",
            Vec3::new(-20.0, 11.0, -300.0),
        ),
        BillboardContent::new(
            "billboard-6",
            "1 Billion+",
            "People worldwide live with disabilities. That's 15% of the global population you might be excluding.",
            Vec3::new(22.0, 8.0, -380.0),
        ),
        BillboardContent::new(
            "billboard-7",
            "Color Contrast",
            "4.5:1 minimum for normal text. 3:1 for large text. Test your designs!",
            Vec3::new(-18.0, 13.0, -460.0),
        ),
        BillboardContent::new(
            "billboard-8",
            "Keyboard First",
            "If it works with a keyboard, it works for everyone. Tab, Enter, Space, Arrows.",
            Vec3::new(15.0, 10.0, -540.0),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn eight_unique_entries_inside_the_corridor() {
        let contents = default_contents();
        assert_eq!(contents.len(), 8);
        let ids: HashSet<&str> = contents.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), 8);
        for c in &contents {
            assert!(c.position.z < 0.0 && c.position.z > -600.0);
            assert!(c.position.x != 0.0);
        }
    }
}
