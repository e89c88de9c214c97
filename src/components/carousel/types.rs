//! Project data shown by the carousel.

use serde::Deserialize;

/// Whether an entry's media is a video or a still image.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
	Video,
	Image,
}

/// One project slide.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ProjectEntry {
	pub title: String,
	pub description: String,
	/// URL of the video or image asset.
	pub media: String,
	pub kind: MediaKind,
	/// Still image shown when video playback cannot proceed.
	#[serde(default)]
	pub fallback: Option<String>,
}

impl ProjectEntry {
	pub fn is_video(&self) -> bool {
		self.kind == MediaKind::Video
	}
}

/// Projects shown when the page does not embed its own list.
pub fn default_projects() -> Vec<ProjectEntry> {
	vec![
		ProjectEntry {
			title: "Buttered Bread".into(),
			description: "My first coding project: a website dedicated to sourdough bread, built with \
			              HTML, CSS and vanilla JavaScript. Plenty of room to grow, but the vibe \
			              was right and it started the whole journey into web development."
				.into(),
			media: "/media/buttered-bread-demo.mp4".into(),
			kind: MediaKind::Video,
			fallback: Some("/media/buttered-bread.jpg".into()),
		},
		ProjectEntry {
			title: "Project 2".into(),
			description: "Description of project 2.".into(),
			media: "/project2.jpg".into(),
			kind: MediaKind::Image,
			fallback: None,
		},
	]
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_embedded_project_list() {
		let json = r#"[
			{"title": "Clip", "description": "A video", "media": "/a.mp4", "kind": "video", "fallback": "/a.jpg"},
			{"title": "Still", "description": "An image", "media": "/b.png", "kind": "image"}
		]"#;
		let entries: Vec<ProjectEntry> = serde_json::from_str(json).unwrap();

		assert_eq!(entries.len(), 2);
		assert!(entries[0].is_video());
		assert_eq!(entries[0].fallback.as_deref(), Some("/a.jpg"));
		assert_eq!(entries[1].kind, MediaKind::Image);
		assert_eq!(entries[1].fallback, None);
	}

	#[test]
	fn rejects_unknown_media_kind() {
		let json = r#"{"title": "x", "description": "y", "media": "/z", "kind": "audio"}"#;
		assert!(serde_json::from_str::<ProjectEntry>(json).is_err());
	}

	#[test]
	fn defaults_are_not_empty() {
		let projects = default_projects();
		assert!(!projects.is_empty());
		assert!(projects.iter().any(ProjectEntry::is_video));
	}
}
