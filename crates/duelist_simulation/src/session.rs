//! Scripted input session (headless прогоны и тесты детерминизма)
//!
//! Заменяет device layer: раз в fixed tick, ДО controller systems, пишет
//! `PlayerInput` всех `PlayerCharacter` по таблице (tick → action).
//! Level-поля (move, guard, look) держатся до следующего изменения,
//! edge-флаги выставляются на один тик и живут до потребления.

use bevy::prelude::*;

use crate::controller::PlayerCharacter;
use crate::input::PlayerInput;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptAction {
    Move(Vec2),
    Look(Vec2),
    Guard(bool),
    Jump,
    Sprint,
    Attack,
    Dodge,
    Combat,
    Noncombat,
}

/// Таблица действий по тикам
#[derive(Resource, Debug, Clone, Default)]
pub struct InputScript {
    steps: Vec<(u32, ScriptAction)>,
    tick: u32,
    move_axis: Vec2,
    look: Vec2,
    guard: bool,
}

impl InputScript {
    pub fn new(mut steps: Vec<(u32, ScriptAction)>) -> Self {
        steps.sort_by_key(|(tick, _)| *tick);
        Self {
            steps,
            ..default()
        }
    }

    /// Дуэльная сессия на 600 тиков: ходьба, sprint, прыжок, combat, атака,
    /// guard, dodge, выход из combat, остановка.
    pub fn duel_session() -> Self {
        use ScriptAction::*;

        Self::new(vec![
            (0, Move(Vec2::Y)),
            (120, Sprint),
            (200, Jump),
            (300, Sprint),
            (300, Look(Vec2::new(2.0, 0.0))),
            (330, Look(Vec2::ZERO)),
            (340, Combat),
            (360, Attack),
            (380, Guard(true)),
            (420, Guard(false)),
            (440, Dodge),
            (480, Noncombat),
            (500, Attack),
            (540, Move(Vec2::ZERO)),
        ])
    }

    /// Текущий тик скрипта (сколько раз применён)
    pub fn tick(&self) -> u32 {
        self.tick
    }

    /// Применить действия текущего тика и сдвинуть счётчик
    pub fn apply(&mut self, input: &mut PlayerInput) {
        let tick = self.tick;

        for (_, action) in self.steps.iter().filter(|(at, _)| *at == tick) {
            match *action {
                ScriptAction::Move(axis) => self.move_axis = axis,
                ScriptAction::Look(look) => self.look = look,
                ScriptAction::Guard(held) => self.guard = held,
                ScriptAction::Jump => input.jump = true,
                ScriptAction::Sprint => input.sprint = true,
                ScriptAction::Attack => input.attack = true,
                ScriptAction::Dodge => input.dodge = true,
                ScriptAction::Combat => input.combat = true,
                ScriptAction::Noncombat => input.noncombat = true,
            }
        }

        input.move_axis = self.move_axis;
        input.look = self.look;
        input.guard = self.guard;
    }

    fn advance(&mut self) {
        self.tick += 1;
    }
}

/// System: скрипт → PlayerInput (FixedPreUpdate)
pub fn drive_input_script(
    mut script: ResMut<InputScript>,
    mut query: Query<&mut PlayerInput, With<PlayerCharacter>>,
) {
    for mut input in query.iter_mut() {
        script.apply(&mut input);
    }
    script.advance();
}

/// Plugin: scripted input вместо device layer
pub struct InputScriptPlugin {
    pub script: InputScript,
}

impl Plugin for InputScriptPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.script.clone())
            .add_systems(FixedPreUpdate, drive_input_script);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_fields_persist_edges_fire_once() {
        let mut script = InputScript::new(vec![
            (0, ScriptAction::Move(Vec2::X)),
            (0, ScriptAction::Jump),
            (2, ScriptAction::Guard(true)),
        ]);
        let mut input = PlayerInput::default();

        script.apply(&mut input);
        script.advance();
        assert_eq!(input.move_axis, Vec2::X);
        assert!(input.take_jump());

        script.apply(&mut input);
        script.advance();
        assert_eq!(input.move_axis, Vec2::X);
        assert!(!input.jump);
        assert!(!input.guard);

        script.apply(&mut input);
        assert!(input.guard);
        assert_eq!(script.tick(), 2);
    }

    #[test]
    fn test_unconsumed_edge_stays_pending() {
        let mut script = InputScript::new(vec![(0, ScriptAction::Attack)]);
        let mut input = PlayerInput::default();

        script.apply(&mut input);
        script.advance();
        script.apply(&mut input);

        assert!(input.attack);
    }
}
