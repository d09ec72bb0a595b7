//! Trigger state machine: turns raw key/button edges into zoom commands
//! according to the hold/toggle policy.

use super::keys::{KeyCode, Modifiers, MouseButton};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerMode {
    #[default]
    Hold,
    Toggle,
}

/// What physically fires the trigger, on top of the required modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerBinding {
    Key(KeyCode),
    Button(MouseButton),
    /// Fired by the modifier combination alone.
    ModifiersOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerConfig {
    pub mode: TriggerMode,
    pub binding: TriggerBinding,
    pub modifiers: Modifiers,
}

impl TriggerConfig {
    /// A modifier-only binding with no modifiers can never fire.
    pub fn is_valid(&self) -> bool {
        match self.binding {
            TriggerBinding::Key(KeyCode::Other(_)) => false,
            TriggerBinding::Key(_) | TriggerBinding::Button(_) => true,
            TriggerBinding::ModifiersOnly => !self.modifiers.is_empty(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Down,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeDevice {
    Key(KeyCode),
    Button(MouseButton),
}

/// One raw edge from the hook layer. `modifiers` is the held set after the
/// edge was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEdge {
    pub kind: EdgeKind,
    pub device: EdgeDevice,
    pub modifiers: Modifiers,
}

impl InputEdge {
    pub fn key_down(key: KeyCode, modifiers: Modifiers) -> Self {
        Self {
            kind: EdgeKind::Down,
            device: EdgeDevice::Key(key),
            modifiers,
        }
    }

    pub fn key_up(key: KeyCode, modifiers: Modifiers) -> Self {
        Self {
            kind: EdgeKind::Up,
            device: EdgeDevice::Key(key),
            modifiers,
        }
    }

    pub fn button_down(button: MouseButton, modifiers: Modifiers) -> Self {
        Self {
            kind: EdgeKind::Down,
            device: EdgeDevice::Button(button),
            modifiers,
        }
    }

    pub fn button_up(button: MouseButton, modifiers: Modifiers) -> Self {
        Self {
            kind: EdgeKind::Up,
            device: EdgeDevice::Button(button),
            modifiers,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerCommand {
    StartZoomIn,
    StartZoomOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerState {
    #[default]
    Idle,
    ActiveHold,
    ActiveToggleOn,
}

impl TriggerState {
    pub fn is_active(self) -> bool {
        !matches!(self, TriggerState::Idle)
    }
}

#[derive(Debug, Clone)]
pub struct TriggerMachine {
    config: TriggerConfig,
    state: TriggerState,
}

impl TriggerMachine {
    pub fn new(config: TriggerConfig) -> Self {
        if !config.is_valid() {
            log::warn!("trigger disabled: invalid binding {:?}", config.binding);
        }
        Self {
            config,
            state: TriggerState::Idle,
        }
    }

    pub fn config(&self) -> &TriggerConfig {
        &self.config
    }

    pub fn state(&self) -> TriggerState {
        self.state
    }

    /// Swaps the binding. An active cycle stays active, translated into the
    /// new mode's active state so the next matching edge still releases it.
    pub fn reconfigure(&mut self, config: TriggerConfig) {
        if config == self.config {
            return;
        }
        if !config.is_valid() {
            log::warn!("trigger disabled: invalid binding {:?}", config.binding);
        }
        if self.state.is_active() {
            self.state = match config.mode {
                TriggerMode::Hold => TriggerState::ActiveHold,
                TriggerMode::Toggle => TriggerState::ActiveToggleOn,
            };
        }
        self.config = config;
    }

    /// Forgets any active cycle without emitting a command.
    pub fn reset(&mut self) {
        self.state = TriggerState::Idle;
    }

    pub fn on_edge(&mut self, edge: &InputEdge) -> Option<TriggerCommand> {
        if !self.config.is_valid() {
            return None;
        }

        match (self.config.mode, edge.kind) {
            (TriggerMode::Hold, EdgeKind::Down) => {
                if self.fires(edge) {
                    return self.press();
                }
                self.release_if_broken(edge)
            }
            (TriggerMode::Hold, EdgeKind::Up) => {
                if self.state == TriggerState::ActiveHold && self.releases(edge) {
                    return self.release();
                }
                None
            }
            (TriggerMode::Toggle, EdgeKind::Down) if self.fires(edge) => self.press(),
            (TriggerMode::Toggle, _) => None,
        }
    }

    /// A matched activation edge, already filtered by the caller.
    pub fn press(&mut self) -> Option<TriggerCommand> {
        match (self.config.mode, self.state) {
            (TriggerMode::Hold, TriggerState::Idle) => {
                self.state = TriggerState::ActiveHold;
                Some(TriggerCommand::StartZoomIn)
            }
            (TriggerMode::Hold, _) => None,
            (TriggerMode::Toggle, TriggerState::Idle) => {
                self.state = TriggerState::ActiveToggleOn;
                Some(TriggerCommand::StartZoomIn)
            }
            (TriggerMode::Toggle, _) => {
                self.state = TriggerState::Idle;
                Some(TriggerCommand::StartZoomOut)
            }
        }
    }

    /// A matched release edge. Only meaningful in hold mode.
    pub fn release(&mut self) -> Option<TriggerCommand> {
        match (self.config.mode, self.state) {
            (TriggerMode::Hold, TriggerState::ActiveHold) => {
                self.state = TriggerState::Idle;
                Some(TriggerCommand::StartZoomOut)
            }
            _ => None,
        }
    }

    fn fires(&self, edge: &InputEdge) -> bool {
        if edge.kind != EdgeKind::Down || edge.modifiers != self.config.modifiers {
            return false;
        }
        match (self.config.binding, edge.device) {
            (TriggerBinding::Key(want), EdgeDevice::Key(got)) => want == got,
            (TriggerBinding::Button(want), EdgeDevice::Button(got)) => want == got,
            (TriggerBinding::ModifiersOnly, EdgeDevice::Key(got)) => got
                .modifier()
                .is_some_and(|modifier| self.config.modifiers.contains(modifier)),
            _ => false,
        }
    }

    fn releases(&self, edge: &InputEdge) -> bool {
        match (self.config.binding, edge.device) {
            (TriggerBinding::Key(want), EdgeDevice::Key(got)) => want == got,
            (TriggerBinding::Button(want), EdgeDevice::Button(got)) => want == got,
            (TriggerBinding::ModifiersOnly, _) => edge.modifiers != self.config.modifiers,
            _ => false,
        }
    }

    // Pressing an extra modifier during a modifier-only hold breaks the
    // exact-set match just like releasing one does.
    fn release_if_broken(&mut self, edge: &InputEdge) -> Option<TriggerCommand> {
        let modifier_only = self.config.binding == TriggerBinding::ModifiersOnly;
        if modifier_only
            && self.state == TriggerState::ActiveHold
            && edge.modifiers != self.config.modifiers
        {
            return self.release();
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::keys::{Modifier, Side};

    fn ctrl() -> Modifiers {
        Modifiers::NONE.with(Modifier::Ctrl)
    }

    fn key_trigger(mode: TriggerMode) -> TriggerMachine {
        TriggerMachine::new(TriggerConfig {
            mode,
            binding: TriggerBinding::Key(KeyCode::F(1)),
            modifiers: ctrl(),
        })
    }

    #[test]
    fn hold_emits_once_and_releases_on_up() {
        let mut machine = key_trigger(TriggerMode::Hold);
        let down = InputEdge::key_down(KeyCode::F(1), ctrl());

        assert_eq!(machine.on_edge(&down), Some(TriggerCommand::StartZoomIn));
        assert_eq!(machine.state(), TriggerState::ActiveHold);
        // Auto-repeat while held must not restart the zoom.
        assert_eq!(machine.on_edge(&down), None);
        assert_eq!(machine.on_edge(&down), None);

        let up = InputEdge::key_up(KeyCode::F(1), ctrl());
        assert_eq!(machine.on_edge(&up), Some(TriggerCommand::StartZoomOut));
        assert_eq!(machine.state(), TriggerState::Idle);
        assert_eq!(machine.on_edge(&up), None);
    }

    #[test]
    fn hold_release_does_not_require_modifiers_still_held() {
        let mut machine = key_trigger(TriggerMode::Hold);
        machine.on_edge(&InputEdge::key_down(KeyCode::F(1), ctrl()));
        let up = InputEdge::key_up(KeyCode::F(1), Modifiers::NONE);
        assert_eq!(machine.on_edge(&up), Some(TriggerCommand::StartZoomOut));
    }

    #[test]
    fn modifier_set_must_match_exactly() {
        let mut machine = key_trigger(TriggerMode::Hold);
        let superset = ctrl().with(Modifier::Shift);
        assert_eq!(machine.on_edge(&InputEdge::key_down(KeyCode::F(1), superset)), None);
        assert_eq!(
            machine.on_edge(&InputEdge::key_down(KeyCode::F(1), Modifiers::NONE)),
            None
        );
        assert_eq!(machine.on_edge(&InputEdge::key_down(KeyCode::F(2), ctrl())), None);
        assert_eq!(machine.state(), TriggerState::Idle);
    }

    #[test]
    fn toggle_flips_on_each_down_and_ignores_up() {
        let mut machine = key_trigger(TriggerMode::Toggle);
        let down = InputEdge::key_down(KeyCode::F(1), ctrl());
        let up = InputEdge::key_up(KeyCode::F(1), ctrl());

        assert_eq!(machine.on_edge(&down), Some(TriggerCommand::StartZoomIn));
        assert_eq!(machine.on_edge(&up), None);
        assert_eq!(machine.state(), TriggerState::ActiveToggleOn);
        assert_eq!(machine.on_edge(&down), Some(TriggerCommand::StartZoomOut));
        assert_eq!(machine.on_edge(&up), None);
        assert_eq!(machine.state(), TriggerState::Idle);
    }

    #[test]
    fn mouse_trigger_distinguishes_auxiliary_buttons() {
        let mut machine = TriggerMachine::new(TriggerConfig {
            mode: TriggerMode::Hold,
            binding: TriggerBinding::Button(MouseButton::X1),
            modifiers: Modifiers::NONE,
        });
        let x2 = InputEdge::button_down(MouseButton::X2, Modifiers::NONE);
        assert_eq!(machine.on_edge(&x2), None);

        let x1 = InputEdge::button_down(MouseButton::X1, Modifiers::NONE);
        assert_eq!(machine.on_edge(&x1), Some(TriggerCommand::StartZoomIn));

        let x2_up = InputEdge::button_up(MouseButton::X2, Modifiers::NONE);
        assert_eq!(machine.on_edge(&x2_up), None);
        let x1_up = InputEdge::button_up(MouseButton::X1, Modifiers::NONE);
        assert_eq!(machine.on_edge(&x1_up), Some(TriggerCommand::StartZoomOut));
    }

    #[test]
    fn modifier_only_hold_fires_on_completing_combination() {
        let required = ctrl().with(Modifier::Alt);
        let mut machine = TriggerMachine::new(TriggerConfig {
            mode: TriggerMode::Hold,
            binding: TriggerBinding::ModifiersOnly,
            modifiers: required,
        });
        let ctrl_key = KeyCode::Mod(Modifier::Ctrl, Side::Left);
        let alt_key = KeyCode::Mod(Modifier::Alt, Side::Left);

        assert_eq!(machine.on_edge(&InputEdge::key_down(ctrl_key, ctrl())), None);
        assert_eq!(
            machine.on_edge(&InputEdge::key_down(alt_key, required)),
            Some(TriggerCommand::StartZoomIn)
        );
        assert_eq!(
            machine.on_edge(&InputEdge::key_up(alt_key, ctrl())),
            Some(TriggerCommand::StartZoomOut)
        );
    }

    #[test]
    fn modifier_only_hold_releases_when_extra_modifier_pressed() {
        let mut machine = TriggerMachine::new(TriggerConfig {
            mode: TriggerMode::Hold,
            binding: TriggerBinding::ModifiersOnly,
            modifiers: ctrl(),
        });
        let ctrl_key = KeyCode::Mod(Modifier::Ctrl, Side::Right);
        assert_eq!(
            machine.on_edge(&InputEdge::key_down(ctrl_key, ctrl())),
            Some(TriggerCommand::StartZoomIn)
        );
        let shift_key = KeyCode::Mod(Modifier::Shift, Side::Left);
        assert_eq!(
            machine.on_edge(&InputEdge::key_down(shift_key, ctrl().with(Modifier::Shift))),
            Some(TriggerCommand::StartZoomOut)
        );
    }

    #[test]
    fn modifier_only_ignores_non_modifier_edges() {
        let mut machine = TriggerMachine::new(TriggerConfig {
            mode: TriggerMode::Toggle,
            binding: TriggerBinding::ModifiersOnly,
            modifiers: ctrl(),
        });
        assert_eq!(machine.on_edge(&InputEdge::key_down(KeyCode::Char('A'), ctrl())), None);
        let ctrl_key = KeyCode::Mod(Modifier::Ctrl, Side::Left);
        assert_eq!(
            machine.on_edge(&InputEdge::key_down(ctrl_key, ctrl())),
            Some(TriggerCommand::StartZoomIn)
        );
    }

    #[test]
    fn invalid_configuration_never_emits() {
        let mut machine = TriggerMachine::new(TriggerConfig {
            mode: TriggerMode::Toggle,
            binding: TriggerBinding::ModifiersOnly,
            modifiers: Modifiers::NONE,
        });
        let shift_key = KeyCode::Mod(Modifier::Shift, Side::Left);
        assert_eq!(
            machine.on_edge(&InputEdge::key_down(shift_key, Modifiers::NONE)),
            None
        );
        assert_eq!(machine.state(), TriggerState::Idle);
    }

    #[test]
    fn reconfigure_keeps_active_cycle_releasable() {
        let mut machine = key_trigger(TriggerMode::Hold);
        machine.on_edge(&InputEdge::key_down(KeyCode::F(1), ctrl()));
        machine.reconfigure(TriggerConfig {
            mode: TriggerMode::Toggle,
            binding: TriggerBinding::Key(KeyCode::F(1)),
            modifiers: ctrl(),
        });
        assert_eq!(machine.state(), TriggerState::ActiveToggleOn);
        assert_eq!(
            machine.on_edge(&InputEdge::key_down(KeyCode::F(1), ctrl())),
            Some(TriggerCommand::StartZoomOut)
        );
    }
}
