//! User configuration: keybindings, stack tuning, and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/millions-club/config.toml` (default
//! `~/.config/millions-club/config.toml`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::card_stack::StackConfig;

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    PrevCard,
    NextCard,
    OpenWallet,
    Back,
    Quit,
}

impl Action {
    /// Ordered list of all actions (config file order).
    pub const ALL: &[Action] = &[
        Action::PrevCard,
        Action::NextCard,
        Action::OpenWallet,
        Action::Back,
        Action::Quit,
    ];

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::PrevCard => "prev_card",
            Action::NextCard => "next_card",
            Action::OpenWallet => "open_wallet",
            Action::Back => "back",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        match s {
            "prev_card" => Some(Action::PrevCard),
            "next_card" => Some(Action::NextCard),
            "open_wallet" => Some(Action::OpenWallet),
            "back" => Some(Action::Back),
            "quit" => Some(Action::Quit),
            _ => None,
        }
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding (key code plus modifiers).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// User-friendly display string (e.g. `"↑"`, `"Ctrl+c"`, `"q"`).
    pub fn display(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&match self.code {
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::Backspace => "Bksp".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            other => key_name(other),
        });
        s
    }

    /// Serialise to config-file format (e.g. `"Alt+Up"`, `"Ctrl+c"`, `"q"`).
    fn to_config_string(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&key_name(self.code));
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Alt+Up"`, `"q"`, `"Enter"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backspace" | "bksp" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') && s.len() > 1 => {
                let n: u8 = s[1..].parse().ok()?;
                KeyCode::F(n)
            }
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

fn modifier_prefix(modifiers: KeyModifiers) -> String {
    let mut s = String::new();
    if modifiers.contains(KeyModifiers::CONTROL) {
        s.push_str("Ctrl+");
    }
    if modifiers.contains(KeyModifiers::ALT) {
        s.push_str("Alt+");
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        s.push_str("Shift+");
    }
    s
}

fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".into(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Up => "Up".into(),
        KeyCode::Down => "Down".into(),
        KeyCode::Left => "Left".into(),
        KeyCode::Right => "Right".into(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Esc => "Esc".into(),
        KeyCode::Tab => "Tab".into(),
        KeyCode::Backspace => "Backspace".into(),
        KeyCode::Delete => "Delete".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        KeyCode::PageUp => "PageUp".into(),
        KeyCode::PageDown => "PageDown".into(),
        KeyCode::F(n) => format!("F{n}"),
        other => format!("{other:?}"),
    }
}

// ───────────────────────────────────────── stack tuning ──────

/// User-tunable feel of the card stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackTuning {
    pub fling_velocity: f64,
    pub spring_damping: f64,
    pub spring_stiffness: f64,
    pub spring_mass: f64,
    pub velocity_divisor: f64,
    /// Stack offset units covered by one terminal row of pointer movement.
    pub points_per_row: f64,
}

impl Default for StackTuning {
    fn default() -> Self {
        let base = StackConfig::default();
        Self {
            fling_velocity: base.fling_velocity,
            spring_damping: base.spring.damping,
            spring_stiffness: base.spring.stiffness,
            spring_mass: base.spring.mass,
            velocity_divisor: base.velocity_divisor,
            points_per_row: 16.0,
        }
    }
}

impl StackTuning {
    /// Stack configuration for `card_count` cards with this tuning applied.
    pub fn stack_config(&self, card_count: usize) -> StackConfig {
        let mut config = StackConfig {
            card_count,
            fling_velocity: self.fling_velocity,
            velocity_divisor: self.velocity_divisor,
            ..StackConfig::default()
        };
        config.spring.damping = self.spring_damping;
        config.spring.stiffness = self.spring_stiffness;
        config.spring.mass = self.spring_mass;
        config
    }

    fn is_valid(&self) -> bool {
        self.points_per_row.is_finite()
            && self.points_per_row > 0.0
            && self.stack_config(1).validate().is_ok()
    }

    fn set(&mut self, key: &str, value: f64) -> bool {
        let slot = match key {
            "fling_velocity" => &mut self.fling_velocity,
            "spring_damping" => &mut self.spring_damping,
            "spring_stiffness" => &mut self.spring_stiffness,
            "spring_mass" => &mut self.spring_mass,
            "velocity_divisor" => &mut self.velocity_divisor,
            "points_per_row" => &mut self.points_per_row,
            _ => return false,
        };
        *slot = value;
        true
    }
}

// ───────────────────────────────────────── config ────────────

/// Keybindings and stack tuning.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    pub tuning: StackTuning,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            tuning: StackTuning::default(),
        }
    }
}

impl AppConfig {
    /// Built-in key bindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(PrevCard, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(NextCard, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(OpenWallet, vec![KeyBind::new(Enter, n), KeyBind::new(Char('a'), n)]);
        m.insert(Back, vec![KeyBind::new(Esc, n), KeyBind::new(Backspace, n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Status-bar hint for the welcome screen.
    pub fn welcome_hint(&self) -> String {
        format!(
            "←/→: choose | Enter: select | {}: quit",
            self.short_binding(Action::Quit),
        )
    }

    /// Status-bar hint for the home screen.
    pub fn home_hint(&self) -> String {
        format!(
            "drag/{}{}: switch wallet | {}: details | {}: quit",
            self.short_binding(Action::PrevCard),
            self.short_binding(Action::NextCard),
            self.short_binding(Action::OpenWallet),
            self.short_binding(Action::Quit),
        )
    }

    /// Status-bar hint for the transactions screen.
    pub fn transactions_hint(&self) -> String {
        format!(
            "{}/{}: scroll | {}: back | {}: quit",
            self.short_binding(Action::PrevCard),
            self.short_binding(Action::NextCard),
            self.short_binding(Action::Back),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse_config(&contents),
            Err(_) => Self::default(),
        }
    }

    /// Persist current config to the default location.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = config_path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.serialise())?;
        Ok(())
    }

    fn parse_config(s: &str) -> Self {
        let mut bindings = Self::default_bindings();
        let mut tuning = StackTuning::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            if let Some(action) = Action::from_config_key(key) {
                let parsed: Vec<KeyBind> = value
                    .split(',')
                    .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                    .collect();
                if !parsed.is_empty() {
                    bindings.insert(action, parsed);
                }
                continue;
            }

            match value.parse::<f64>() {
                Ok(v) => {
                    if !tuning.set(key, v) {
                        tracing::debug!(key, "ignoring unknown config key");
                    }
                }
                Err(_) => tracing::warn!(key, value, "ignoring non-numeric config value"),
            }
        }

        if !tuning.is_valid() {
            tracing::warn!(?tuning, "invalid stack tuning in config, using defaults");
            tuning = StackTuning::default();
        }

        Self { bindings, tuning }
    }

    fn serialise(&self) -> String {
        let t = &self.tuning;
        let mut lines = vec![
            "# millions-club configuration".to_string(),
            String::new(),
            "# Card stack feel".to_string(),
            format!("fling_velocity = {}", t.fling_velocity),
            format!("spring_damping = {}", t.spring_damping),
            format!("spring_stiffness = {}", t.spring_stiffness),
            format!("spring_mass = {}", t.spring_mass),
            format!("velocity_divisor = {}", t.velocity_divisor),
            format!("points_per_row = {}", t.points_per_row),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Tab,".to_string(),
            "#   Backspace, Delete, Home, End, PageUp, PageDown, Space, F1-F12".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }

    /// The file contents `save` would write.
    pub fn to_file_string(&self) -> String {
        self.serialise()
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/millions-club/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("millions-club").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        let mut ev = KeyEvent::new(code, modifiers);
        ev.kind = KeyEventKind::Press;
        ev
    }

    #[test]
    fn default_bindings_match() {
        let config = AppConfig::default();
        assert_eq!(config.match_key(press(KeyCode::Char('j'), KeyModifiers::NONE)), Some(Action::NextCard));
        assert_eq!(config.match_key(press(KeyCode::Up, KeyModifiers::NONE)), Some(Action::PrevCard));
        assert_eq!(config.match_key(press(KeyCode::Esc, KeyModifiers::NONE)), Some(Action::Back));
        assert_eq!(config.match_key(press(KeyCode::Char('z'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn parses_key_strings() {
        assert_eq!(
            KeyBind::parse("Ctrl+n"),
            Some(KeyBind::new(KeyCode::Char('n'), KeyModifiers::CONTROL))
        );
        assert_eq!(KeyBind::parse("PageDown"), Some(KeyBind::new(KeyCode::PageDown, KeyModifiers::NONE)));
        assert_eq!(KeyBind::parse("F5"), Some(KeyBind::new(KeyCode::F(5), KeyModifiers::NONE)));
        assert_eq!(KeyBind::parse("J"), Some(KeyBind::new(KeyCode::Char('J'), KeyModifiers::NONE)));
        assert_eq!(KeyBind::parse("Hyper+x"), None);
        assert_eq!(KeyBind::parse("nonsense"), None);
    }

    #[test]
    fn config_file_overrides_bindings_and_tuning() {
        let config = AppConfig::parse_config(
            "# comment\nnext_card = n, Ctrl+Down\nfling_velocity = 900\nunknown = 3\n",
        );

        assert_eq!(config.match_key(press(KeyCode::Char('n'), KeyModifiers::NONE)), Some(Action::NextCard));
        assert_eq!(config.match_key(press(KeyCode::Char('j'), KeyModifiers::NONE)), None);
        assert_eq!(config.tuning.fling_velocity, 900.0);
        assert_eq!(config.tuning.spring_stiffness, StackTuning::default().spring_stiffness);
    }

    #[test]
    fn invalid_tuning_falls_back_to_defaults() {
        let config = AppConfig::parse_config("spring_mass = 0\nfling_velocity = 900\n");
        assert_eq!(config.tuning, StackTuning::default());

        let config = AppConfig::parse_config("points_per_row = -2\n");
        assert_eq!(config.tuning, StackTuning::default());
    }

    #[test]
    fn serialised_config_reloads_identically() {
        let mut config = AppConfig::default();
        config.tuning.spring_damping = 22.5;
        config
            .bindings
            .insert(Action::Quit, vec![KeyBind::new(KeyCode::Char('x'), KeyModifiers::CONTROL)]);

        let reloaded = AppConfig::parse_config(&config.serialise());
        assert_eq!(reloaded.tuning, config.tuning);
        assert_eq!(reloaded.bindings, config.bindings);
    }

    #[test]
    fn save_and_load_through_disk() {
        let dir = std::env::temp_dir().join(format!("millions-club-test-{}", std::process::id()));
        let path = dir.join("config.toml");
        let mut config = AppConfig::default();
        config.tuning.points_per_row = 12.0;

        config.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path);
        assert_eq!(loaded.tuning.points_per_row, 12.0);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn tuning_feeds_stack_config() {
        let tuning = StackTuning {
            spring_stiffness: 300.0,
            ..StackTuning::default()
        };
        let config = tuning.stack_config(4);
        assert_eq!(config.card_count, 4);
        assert_eq!(config.spring.stiffness, 300.0);
        assert_eq!(config.step, 50.0);
        assert!(config.validate().is_ok());
    }
}
