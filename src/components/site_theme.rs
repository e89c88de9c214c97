//! Site-wide light / dark / color theme.
//!
//! The color theme draws a random pastel background with a matching dark
//! text color. Recently used hues are remembered by the [`HuePicker`] owned
//! by each [`ThemeController`], so consecutive picks look different.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::str::FromStr;

use log::{debug, warn};
use rand::Rng;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, Storage};

/// Storage key for the selected mode.
pub const THEME_KEY: &str = "theme";
/// Storage key for the color theme's background.
pub const BACKGROUND_KEY: &str = "randomBackground";
/// Storage key for the color theme's text color.
pub const TEXT_KEY: &str = "randomText";

/// Number of recent hues the picker avoids.
pub const RECENT_HUES: usize = 10;

const HUES: u16 = 360;

/// Page theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ThemeMode {
	#[default]
	Light,
	Dark,
	/// Random pastel background.
	Color,
}

impl ThemeMode {
	/// Every mode, in navbar order.
	pub const ALL: [ThemeMode; 3] = [ThemeMode::Light, ThemeMode::Dark, ThemeMode::Color];

	/// Class name on `<html>` and stored value.
	pub fn as_str(self) -> &'static str {
		match self {
			ThemeMode::Light => "light",
			ThemeMode::Dark => "dark",
			ThemeMode::Color => "color",
		}
	}

	/// Button text.
	pub fn label(self) -> &'static str {
		match self {
			ThemeMode::Light => "Light",
			ThemeMode::Dark => "Dark",
			ThemeMode::Color => "Color",
		}
	}
}

impl fmt::Display for ThemeMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A stored theme name that is not one of the known modes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownThemeMode(pub String);

impl fmt::Display for UnknownThemeMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "unknown theme mode '{}'", self.0)
	}
}

impl std::error::Error for UnknownThemeMode {}

impl FromStr for ThemeMode {
	type Err = UnknownThemeMode;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"light" => Ok(ThemeMode::Light),
			"dark" => Ok(ThemeMode::Dark),
			"color" => Ok(ThemeMode::Color),
			other => Err(UnknownThemeMode(other.to_string())),
		}
	}
}

/// Picks hues in `0..360`, never repeating one of the last few picks.
#[derive(Clone, Debug)]
pub struct HuePicker {
	recent: VecDeque<u16>,
	capacity: usize,
}

impl Default for HuePicker {
	fn default() -> Self {
		Self::new(RECENT_HUES)
	}
}

impl HuePicker {
	/// Remember up to `capacity` hues (at most 359, so a pick always exists).
	pub fn new(capacity: usize) -> Self {
		let capacity = capacity.min(HUES as usize - 1);
		Self {
			recent: VecDeque::with_capacity(capacity + 1),
			capacity,
		}
	}

	/// Hues currently excluded, oldest first.
	pub fn recent(&self) -> impl Iterator<Item = u16> + '_ {
		self.recent.iter().copied()
	}

	/// Most recent pick, if any.
	pub fn last(&self) -> Option<u16> {
		self.recent.back().copied()
	}

	pub fn next_hue(&mut self, rng: &mut impl Rng) -> u16 {
		let available = HUES as usize - self.recent.len();
		let n = rng.gen_range(0..available);
		// n-th hue outside the recent window
		let hue = (0..HUES)
			.filter(|h| !self.recent.contains(h))
			.nth(n)
			.unwrap_or_default();

		self.recent.push_back(hue);
		if self.recent.len() > self.capacity {
			self.recent.pop_front();
		}
		hue
	}
}

/// Background and text colors of the color theme, as CSS values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorScheme {
	pub background: String,
	pub text: String,
}

impl ColorScheme {
	/// Light pastel background with dark text of the same hue.
	pub fn from_hue(hue: u16) -> Self {
		Self {
			background: format!("hsl({hue}, 70%, 85%)"),
			text: format!("hsl({hue}, 70%, 25%)"),
		}
	}
}

/// Key-value surface the theme preference is persisted to.
pub trait PreferenceStore {
	/// Stored value for `key`, if any.
	fn get(&self, key: &str) -> Option<String>;
	/// Store `value` under `key`. Failures are logged by the implementation.
	fn set(&mut self, key: &str, value: &str);
}

impl PreferenceStore for Storage {
	fn get(&self, key: &str) -> Option<String> {
		self.get_item(key).ok().flatten()
	}

	fn set(&mut self, key: &str, value: &str) {
		if let Err(e) = self.set_item(key, value) {
			warn!("theme: failed to store '{key}': {e:?}");
		}
	}
}

impl PreferenceStore for HashMap<String, String> {
	fn get(&self, key: &str) -> Option<String> {
		HashMap::get(self, key).cloned()
	}

	fn set(&mut self, key: &str, value: &str) {
		self.insert(key.to_string(), value.to_string());
	}
}

/// Persisted theme choice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ThemePreference {
	pub mode: ThemeMode,
	/// Colors of the color theme; kept while another mode is active so
	/// switching back restores them.
	pub scheme: Option<ColorScheme>,
}

impl ThemePreference {
	/// Read a saved preference. `None` if no valid mode is stored.
	pub fn load(store: &impl PreferenceStore) -> Option<Self> {
		let raw = store.get(THEME_KEY)?;
		let mode = match raw.parse::<ThemeMode>() {
			Ok(mode) => mode,
			Err(e) => {
				warn!("theme: ignoring saved preference: {e}");
				return None;
			}
		};
		let scheme = match (store.get(BACKGROUND_KEY), store.get(TEXT_KEY)) {
			(Some(background), Some(text)) if !background.is_empty() && !text.is_empty() => {
				Some(ColorScheme { background, text })
			}
			_ => None,
		};
		Some(Self { mode, scheme })
	}

	pub fn save(&self, store: &mut impl PreferenceStore) {
		store.set(THEME_KEY, self.mode.as_str());
		if let Some(scheme) = &self.scheme {
			store.set(BACKGROUND_KEY, &scheme.background);
			store.set(TEXT_KEY, &scheme.text);
		}
	}
}

/// Current theme plus the hue memory used to pick new color schemes.
#[derive(Clone, Debug, Default)]
pub struct ThemeController {
	preference: ThemePreference,
	hues: HuePicker,
}

impl ThemeController {
	pub fn new(preference: ThemePreference) -> Self {
		Self {
			preference,
			hues: HuePicker::default(),
		}
	}

	/// Initial theme: the saved one, else the system dark preference, else
	/// light. A color theme without saved colors gets fresh ones.
	pub fn startup(saved: Option<ThemePreference>, prefers_dark: bool, rng: &mut impl Rng) -> Self {
		let preference = saved.unwrap_or(ThemePreference {
			mode: if prefers_dark { ThemeMode::Dark } else { ThemeMode::Light },
			scheme: None,
		});
		let mut controller = Self::new(preference);
		if controller.preference.mode == ThemeMode::Color && controller.preference.scheme.is_none() {
			controller.reroll(rng);
		}
		controller
	}

	pub fn mode(&self) -> ThemeMode {
		self.preference.mode
	}

	pub fn preference(&self) -> &ThemePreference {
		&self.preference
	}

	pub fn hues(&self) -> &HuePicker {
		&self.hues
	}

	/// Switch modes. Every selection of [`ThemeMode::Color`] draws new colors.
	pub fn set_mode(&mut self, mode: ThemeMode, rng: &mut impl Rng) {
		self.preference.mode = mode;
		if mode == ThemeMode::Color {
			self.reroll(rng);
		}
		debug!("theme: {mode}");
	}

	fn reroll(&mut self, rng: &mut impl Rng) {
		let hue = self.hues.next_hue(rng);
		self.preference.scheme = Some(ColorScheme::from_hue(hue));
	}
}

/// `localStorage`, if the browser allows it.
pub fn local_storage() -> Option<Storage> {
	web_sys::window()?.local_storage().ok().flatten()
}

/// Whether the system asks for a dark color scheme.
pub fn prefers_dark() -> bool {
	web_sys::window()
		.and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
		.is_some_and(|q| q.matches())
}

/// Put the theme class on `<html>` and set or clear the color variables.
pub fn apply_to_document(preference: &ThemePreference) {
	let Some(root) = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.document_element())
	else {
		warn!("theme: no document element");
		return;
	};

	let classes = root.class_list();
	if let Err(e) = classes
		.remove_3("light", "dark", "color")
		.and_then(|_| classes.add_1(preference.mode.as_str()))
	{
		warn!("theme: failed to set class: {e:?}");
	}

	let Ok(root) = root.dyn_into::<HtmlElement>() else {
		return;
	};
	let style = root.style();
	let result = match (&preference.scheme, preference.mode) {
		(Some(scheme), ThemeMode::Color) => style
			.set_property("--random-background", &scheme.background)
			.and_then(|_| style.set_property("--random-text", &scheme.text)),
		_ => style
			.remove_property("--random-background")
			.and_then(|_| style.remove_property("--random-text"))
			.map(|_| ()),
	};
	if let Err(e) = result {
		warn!("theme: failed to update color variables: {e:?}");
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	#[test]
	fn modes_parse_and_format() {
		for mode in ThemeMode::ALL {
			assert_eq!(mode.to_string().parse::<ThemeMode>(), Ok(mode));
		}
		assert_eq!(
			"sepia".parse::<ThemeMode>(),
			Err(UnknownThemeMode("sepia".into()))
		);
	}

	#[test]
	fn hue_picker_avoids_recent_hues() {
		let mut rng = SmallRng::seed_from_u64(7);
		let mut picker = HuePicker::default();
		for _ in 0..500 {
			let recent: Vec<u16> = picker.recent().collect();
			let hue = picker.next_hue(&mut rng);
			assert!(hue < 360);
			assert!(!recent.contains(&hue), "{hue} repeated from {recent:?}");
			assert!(picker.recent().count() <= RECENT_HUES);
		}
	}

	#[test]
	fn hue_picker_evicts_oldest() {
		let mut rng = SmallRng::seed_from_u64(1);
		let mut picker = HuePicker::new(2);
		let a = picker.next_hue(&mut rng);
		let b = picker.next_hue(&mut rng);
		let c = picker.next_hue(&mut rng);
		assert_eq!(picker.recent().collect::<Vec<_>>(), vec![b, c]);
		assert_ne!(a, b);
		assert_eq!(picker.last(), Some(c));
	}

	#[test]
	fn scheme_uses_one_hue() {
		let scheme = ColorScheme::from_hue(200);
		assert_eq!(scheme.background, "hsl(200, 70%, 85%)");
		assert_eq!(scheme.text, "hsl(200, 70%, 25%)");
	}

	#[test]
	fn preference_round_trips() {
		let mut store: HashMap<String, String> = HashMap::new();
		let pref = ThemePreference {
			mode: ThemeMode::Color,
			scheme: Some(ColorScheme::from_hue(42)),
		};
		pref.save(&mut store);
		assert_eq!(store.get(THEME_KEY).map(String::as_str), Some("color"));
		assert_eq!(ThemePreference::load(&store), Some(pref));
	}

	#[test]
	fn missing_or_unknown_preference_is_none() {
		let mut store: HashMap<String, String> = HashMap::new();
		assert_eq!(ThemePreference::load(&store), None);
		store.insert(THEME_KEY.into(), "neon".into());
		assert_eq!(ThemePreference::load(&store), None);
	}

	#[test]
	fn startup_order() {
		let mut rng = SmallRng::seed_from_u64(3);
		let saved = ThemePreference {
			mode: ThemeMode::Light,
			scheme: None,
		};
		assert_eq!(ThemeController::startup(Some(saved), true, &mut rng).mode(), ThemeMode::Light);
		assert_eq!(ThemeController::startup(None, true, &mut rng).mode(), ThemeMode::Dark);
		assert_eq!(ThemeController::startup(None, false, &mut rng).mode(), ThemeMode::Light);
	}

	#[test]
	fn saved_color_without_scheme_gets_one() {
		let mut rng = SmallRng::seed_from_u64(3);
		let saved = ThemePreference {
			mode: ThemeMode::Color,
			scheme: None,
		};
		let controller = ThemeController::startup(Some(saved), false, &mut rng);
		assert!(controller.preference().scheme.is_some());
	}

	#[test]
	fn selecting_color_rerolls_every_time() {
		let mut rng = SmallRng::seed_from_u64(11);
		let mut controller = ThemeController::default();
		controller.set_mode(ThemeMode::Color, &mut rng);
		let first = controller.preference().scheme.clone();
		controller.set_mode(ThemeMode::Color, &mut rng);
		let second = controller.preference().scheme.clone();
		assert!(first.is_some());
		assert_ne!(first, second);
		assert_eq!(controller.hues().recent().count(), 2);

		controller.set_mode(ThemeMode::Dark, &mut rng);
		assert_eq!(controller.preference().scheme, second);
	}
}
