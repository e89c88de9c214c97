//! Site shell: navbar and the static Home / Info / Contact views.

use std::time::Duration;

use leptos::prelude::*;
use log::warn;
use serde::Deserialize;

use super::site_theme::ThemeMode;

/// Which page section is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Section {
	#[default]
	Home,
	Projects,
	Info,
	Contact,
}

impl Section {
	/// Sections listed in the navbar; Home is reached through the name.
	pub const NAV: [Section; 3] = [Section::Projects, Section::Info, Section::Contact];

	pub fn label(self) -> &'static str {
		match self {
			Section::Home => "Home",
			Section::Projects => "Projects",
			Section::Info => "Info",
			Section::Contact => "Contact",
		}
	}
}

/// One row of the contact list.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ContactLink {
	/// Leading label, e.g. "Email".
	pub label: String,
	pub href: String,
	/// Visible link text.
	pub text: String,
}

impl ContactLink {
	fn new(label: &str, href: &str, text: &str) -> Self {
		Self {
			label: label.into(),
			href: href.into(),
			text: text.into(),
		}
	}

	/// Web links open in a new tab; `mailto:` and the like do not.
	pub fn is_external(&self) -> bool {
		self.href.starts_with("http://") || self.href.starts_with("https://")
	}
}

/// Site text. Missing fields fall back to the defaults.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteProfile {
	pub name: String,
	pub role: String,
	/// Lines cycled on the home view.
	pub taglines: Vec<String>,
	/// How long each tagline stays up (ms).
	pub tagline_ms: u64,
	/// Short statement in the corner of the home view.
	pub statement: Vec<String>,
	pub bio: Vec<String>,
	pub contact_blurb: String,
	pub contacts: Vec<ContactLink>,
	/// Text of the carousel's closing slide.
	pub closing_text: String,
}

impl Default for SiteProfile {
	fn default() -> Self {
		Self {
			name: "YOUR NAME".into(),
			role: "Creative Developer".into(),
			taglines: vec![
				"Full Stack Developer".into(),
				"Creative Problem Solver".into(),
				"Avid Runner and Sourdough Baker".into(),
			],
			tagline_ms: 3000,
			statement: vec![
				"I believe software can be thoughtful and playful.".into(),
				"With a passion for clean design and creative code,".into(),
				"I craft experiences that are both useful and inspiring.".into(),
			],
			bio: vec![
				"I am a full stack developer passionate about building beautiful and functional \
				 web experiences, with a focus on intuitive interfaces and meaningful interactions."
					.into(),
				"Away from the keyboard I enjoy running, cooking and long walks.".into(),
			],
			contact_blurb: "I'm always open to new opportunities and collaborations.".into(),
			contacts: vec![
				ContactLink::new("Email", "mailto:you@example.com", "you@example.com"),
				ContactLink::new("GitHub", "https://github.com/your-handle", "github.com/your-handle"),
			],
			closing_text: "More on the way. Get in touch to see what I'm working on.".into(),
		}
	}
}

/// Index of the tagline after `index`, wrapping around `len` lines.
pub fn next_tagline(index: usize, len: usize) -> usize {
	if len == 0 { 0 } else { (index + 1) % len }
}

/// Side navigation with the section list and theme buttons.
#[component]
pub fn Navbar(
	name: String,
	role: String,
	active: RwSignal<Section>,
	#[prop(into)] theme: Signal<ThemeMode>,
	#[prop(into)] on_theme: Callback<ThemeMode>,
) -> impl IntoView {
	let links = Section::NAV
		.into_iter()
		.map(|section| {
			view! {
				<li
					class="nav-link"
					class:active=move || active.get() == section
					on:click=move |_| active.set(section)
				>
					{section.label()}
				</li>
			}
		})
		.collect_view();

	let themes = ThemeMode::ALL
		.into_iter()
		.enumerate()
		.map(|(i, mode)| {
			view! {
				{(i > 0).then_some(view! { <span class="theme-sep">"▪"</span> })}
				<button
					class="theme-button"
					class:active=move || theme.get() == mode
					on:click=move |_| on_theme.run(mode)
				>
					{mode.label()}
				</button>
			}
		})
		.collect_view();

	view! {
		<aside class="navbar">
			<div>
				<h1 class="site-name" on:click=move |_| active.set(Section::Home)>
					{name}
				</h1>
				<p class="site-role">{role}</p>
				<nav>
					<ul>{links}</ul>
				</nav>
			</div>
			<div class="theme-switcher">{themes}</div>
		</aside>
	}
}

/// Landing view with a rotating tagline.
#[component]
pub fn HomeView(profile: SiteProfile) -> impl IntoView {
	let SiteProfile {
		taglines,
		tagline_ms,
		statement,
		..
	} = profile;
	let count = taglines.len();
	let index = RwSignal::new(0usize);

	if count > 1 {
		match set_interval_with_handle(
			move || index.update(|i| *i = next_tagline(*i, count)),
			Duration::from_millis(tagline_ms.max(250)),
		) {
			Ok(handle) => on_cleanup(move || handle.clear()),
			Err(e) => warn!("home: tagline rotation unavailable: {e:?}"),
		}
	}

	let tagline = move || taglines.get(index.get()).cloned().unwrap_or_default();
	let statement = statement
		.into_iter()
		.map(|line| view! { <span class="statement-line">{line}</span> })
		.collect_view();

	view! {
		<div class="home">
			<p class="tagline">{tagline}</p>
			<p class="statement">{statement}</p>
		</div>
	}
}

/// Biography.
#[component]
pub fn InfoView(bio: Vec<String>) -> impl IntoView {
	let paragraphs = bio.into_iter().map(|p| view! { <p>{p}</p> }).collect_view();

	view! {
		<div class="info">
			<h2>"About Me"</h2>
			{paragraphs}
		</div>
	}
}

#[component]
pub fn ContactView(blurb: String, contacts: Vec<ContactLink>) -> impl IntoView {
	let rows = contacts
		.into_iter()
		.map(|c| {
			let external = c.is_external();
			view! {
				<p class="contact-row">
					<span class="contact-label">{format!("{}:", c.label)}</span>
					<a
						href=c.href
						target=external.then_some("_blank")
						rel=external.then_some("noopener noreferrer")
					>
						{c.text}
					</a>
				</p>
			}
		})
		.collect_view();

	view! {
		<div class="contact">
			<h2>"Get in Touch"</h2>
			<p class="contact-blurb">{blurb}</p>
			<div class="contact-list">{rows}</div>
		</div>
	}
}
