//! Blackboard — общий канал координации охранников
//!
//! Фиксированный набор ключей (по одному на архетип), не больше одного значения на ключ.
//! Запись перезаписывает, чтение НЕ очищает: потребитель сам делает clear/take,
//! иначе устаревшее значение будет срабатывать каждый тик.
//! Сбрасывается при старте сессии.

use bevy::prelude::*;

use crate::ai::archetypes::Archetype;

/// Символьный сигнал между архетипами
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum SignalToken {
    /// Responder начал погоню
    Pursuit,
}

/// Payload в слоте blackboard
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum BlackboardValue {
    /// "Цель замечена здесь"
    Position(Vec2),
    Signal(SignalToken),
}

#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct Blackboard {
    slots: [Option<BlackboardValue>; Archetype::COUNT],
}

impl Blackboard {
    /// Отсутствующий ключ = None, не ошибка
    pub fn get(&self, key: Archetype) -> Option<BlackboardValue> {
        self.slots[key.index()]
    }

    pub fn post(&mut self, key: Archetype, value: BlackboardValue) {
        self.slots[key.index()] = Some(value);
    }

    pub fn clear(&mut self, key: Archetype) -> Option<BlackboardValue> {
        self.slots[key.index()].take()
    }

    /// Забрать позицию (слот очищается только если там Position)
    pub fn take_position(&mut self, key: Archetype) -> Option<Vec2> {
        match self.slots[key.index()] {
            Some(BlackboardValue::Position(position)) => {
                self.slots[key.index()] = None;
                Some(position)
            }
            _ => None,
        }
    }

    /// Забрать сигнал, если в слоте именно он
    pub fn take_signal(&mut self, key: Archetype, token: SignalToken) -> bool {
        if self.slots[key.index()] == Some(BlackboardValue::Signal(token)) {
            self.slots[key.index()] = None;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.slots = [None; Archetype::COUNT];
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}
