//! Animation parameter table
//!
//! Controller пишет параметры по `AnimParam` (индекс = discriminant), строки
//! не участвуют. `AnimParam::from_name` нужен только внешнему backend'у,
//! если его граф адресует параметры по имени.

use bevy::prelude::*;

/// Как граф читает параметр
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ParamKind {
    Float,
    Bool,
    /// Одноразовый: висит, пока граф не съест или не сбросят
    Trigger,
}

/// Параметры анимации, которые пишет controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
#[repr(u8)]
pub enum AnimParam {
    Speed,
    MotionSpeed,
    Grounded,
    Jump,
    FreeFall,
    Combat,
    Guard,
    Attack,
    Dodge,
}

impl AnimParam {
    pub const COUNT: usize = 9;

    pub const ALL: [AnimParam; Self::COUNT] = [
        AnimParam::Speed,
        AnimParam::MotionSpeed,
        AnimParam::Grounded,
        AnimParam::Jump,
        AnimParam::FreeFall,
        AnimParam::Combat,
        AnimParam::Guard,
        AnimParam::Attack,
        AnimParam::Dodge,
    ];

    /// Integer handle (стабилен, = discriminant)
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Имя параметра в animation graph
    pub const fn name(self) -> &'static str {
        match self {
            AnimParam::Speed => "Speed",
            AnimParam::MotionSpeed => "MotionSpeed",
            AnimParam::Grounded => "Grounded",
            AnimParam::Jump => "Jump",
            AnimParam::FreeFall => "FreeFall",
            AnimParam::Combat => "Combat",
            AnimParam::Guard => "Guard",
            AnimParam::Attack => "Attack",
            AnimParam::Dodge => "Dodge",
        }
    }

    pub const fn kind(self) -> ParamKind {
        match self {
            AnimParam::Speed | AnimParam::MotionSpeed => ParamKind::Float,
            AnimParam::Grounded
            | AnimParam::Jump
            | AnimParam::FreeFall
            | AnimParam::Combat
            | AnimParam::Guard => ParamKind::Bool,
            AnimParam::Attack | AnimParam::Dodge => ParamKind::Trigger,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|param| param.name() == name)
    }
}

/// Состояния графа, у которых бывают exit hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum AnimState {
    Locomotion,
    JumpStart,
    InAir,
    Land,
    Attack,
    Dodge,
    Guard,
}

/// При выходе из `state` сбросить `trigger`
///
/// Без этого trigger, выставленный во время state (повторное нажатие
/// attack посреди анимации атаки), висит и запускает вторую атаку сразу
/// после выхода.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct StateExitHook {
    pub state: AnimState,
    pub trigger: AnimParam,
}

/// Animation sink: значения параметров, которые controller пушит каждый тик.
///
/// Backend (скелетная анимация, вне crate) читает значения и вызывает
/// `consume_trigger` / `on_state_exit` при переходах графа.
///
/// Отсутствие компонента на entity = персонаж без анимации; все push'и
/// пропускаются.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Animator {
    floats: [f32; AnimParam::COUNT],
    bools: [bool; AnimParam::COUNT],
    triggers: [bool; AnimParam::COUNT],
    /// Сколько раз trigger был выставлен (для backend'а и тестов)
    fire_counts: [u32; AnimParam::COUNT],
    exit_hooks: Vec<StateExitHook>,
}

impl Default for Animator {
    fn default() -> Self {
        Self {
            floats: [0.0; AnimParam::COUNT],
            bools: [false; AnimParam::COUNT],
            triggers: [false; AnimParam::COUNT],
            fire_counts: [0; AnimParam::COUNT],
            exit_hooks: vec![
                StateExitHook {
                    state: AnimState::Attack,
                    trigger: AnimParam::Attack,
                },
                StateExitHook {
                    state: AnimState::Dodge,
                    trigger: AnimParam::Dodge,
                },
            ],
        }
    }
}

impl Animator {
    /// Animator без exit hooks
    pub fn bare() -> Self {
        Self {
            exit_hooks: Vec::new(),
            ..default()
        }
    }

    pub fn with_exit_hook(mut self, state: AnimState, trigger: AnimParam) -> Self {
        self.exit_hooks.push(StateExitHook { state, trigger });
        self
    }

    pub fn set_float(&mut self, param: AnimParam, value: f32) {
        debug_assert_eq!(param.kind(), ParamKind::Float, "{} is not a float", param.name());
        self.floats[param.index()] = value;
    }

    pub fn float(&self, param: AnimParam) -> f32 {
        self.floats[param.index()]
    }

    pub fn set_bool(&mut self, param: AnimParam, value: bool) {
        debug_assert_eq!(param.kind(), ParamKind::Bool, "{} is not a bool", param.name());
        self.bools[param.index()] = value;
    }

    pub fn bool(&self, param: AnimParam) -> bool {
        self.bools[param.index()]
    }

    pub fn set_trigger(&mut self, param: AnimParam) {
        debug_assert_eq!(param.kind(), ParamKind::Trigger, "{} is not a trigger", param.name());
        self.triggers[param.index()] = true;
        self.fire_counts[param.index()] += 1;
    }

    pub fn reset_trigger(&mut self, param: AnimParam) {
        self.triggers[param.index()] = false;
    }

    pub fn is_trigger_set(&self, param: AnimParam) -> bool {
        self.triggers[param.index()]
    }

    pub fn fire_count(&self, param: AnimParam) -> u32 {
        self.fire_counts[param.index()]
    }

    /// Graph transition consumed the trigger
    pub fn consume_trigger(&mut self, param: AnimParam) -> bool {
        std::mem::take(&mut self.triggers[param.index()])
    }

    /// Graph покинул `state`: сбросить все привязанные triggers
    pub fn on_state_exit(&mut self, state: AnimState) {
        for hook in &self.exit_hooks {
            if hook.state == state {
                self.triggers[hook.trigger.index()] = false;
            }
        }
    }

    pub fn exit_hooks(&self) -> &[StateExitHook] {
        &self.exit_hooks
    }
}
