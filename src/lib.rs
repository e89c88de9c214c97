//! folio: single-page portfolio site.
//!
//! A WASM (Leptos CSR) application with an animated particle field behind
//! the content, a project carousel with video playback and fallbacks, and a
//! light / dark / color theme switcher.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};
use rand::SeedableRng;
use rand::rngs::SmallRng;

pub mod components;

pub use components::carousel::{
	CarouselConfig, CarouselState, MediaCommand, MediaDisplay, ProjectCarousel, ProjectEntry,
};
pub use components::particle_field::{FieldConfig, ParticleField, ParticleFieldCanvas, ParticleStyle};
pub use components::sections::{Section, SiteProfile};
pub use components::site_theme::{ThemeController, ThemeMode, ThemePreference};

use components::carousel::default_projects;
use components::dom::{browser_seed, load_json_script};
use components::sections::{ContactView, HomeView, InfoView, Navbar};
use components::site_theme::{apply_to_document, local_storage, prefers_dark};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("folio: logging initialized");
}

/// Project list from `<script id="projects-data">`, else the built-in list.
fn load_projects() -> Vec<ProjectEntry> {
	match load_json_script::<Vec<ProjectEntry>>("projects-data") {
		Some(projects) => {
			info!("folio: loaded {} projects", projects.len());
			projects
		}
		None => default_projects(),
	}
}

/// Main application component.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let profile = load_json_script::<SiteProfile>("site-data").unwrap_or_default();
	let projects = load_projects();

	let mut rng = SmallRng::seed_from_u64(browser_seed());
	let saved = local_storage().as_ref().and_then(ThemePreference::load);
	let theme = RwSignal::new(ThemeController::startup(saved, prefers_dark(), &mut rng));
	let rng = StoredValue::new(rng);

	// Persist and apply on every change, including the initial one.
	Effect::new(move |_| {
		theme.with(|controller| {
			let preference = controller.preference();
			apply_to_document(preference);
			if let Some(mut storage) = local_storage() {
				preference.save(&mut storage);
			}
		});
	});

	let mode = Signal::derive(move || theme.with(ThemeController::mode));
	let on_theme = Callback::new(move |next: ThemeMode| {
		rng.update_value(|rng| theme.update(|controller| controller.set_mode(next, rng)));
	});
	let particle_style = Signal::derive(move || ParticleStyle::for_mode(mode.get()));

	let section = RwSignal::new(Section::Home);
	let carousel_config = CarouselConfig {
		closing_slide: true,
		..CarouselConfig::default()
	};
	let title = profile.name.clone();
	let (name, role) = (profile.name.clone(), profile.role.clone());

	let content = move || match section.get() {
		Section::Home => view! { <HomeView profile=profile.clone() /> }.into_any(),
		Section::Projects => {
			let closing_text = profile.closing_text.clone();
			view! {
				<ProjectCarousel
					entries=projects.clone()
					config=carousel_config.clone()
					closing=move || {
						view! {
							<div class="closing-slide">
								<p>{closing_text.clone()}</p>
								<button on:click=move |_| section.set(Section::Contact)>"Get in touch"</button>
							</div>
						}
					}
				/>
			}
			.into_any()
		}
		Section::Info => view! { <InfoView bio=profile.bio.clone() /> }.into_any(),
		Section::Contact => view! {
			<ContactView blurb=profile.contact_blurb.clone() contacts=profile.contacts.clone() />
		}
		.into_any(),
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text=title />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<ParticleFieldCanvas config=FieldConfig::default() style=particle_style />
		<main class="site">
			<Navbar name=name role=role active=section theme=mode on_theme=on_theme />
			<div class="content">{content}</div>
		</main>
	}
}
