use iced::event::{self, Event};
use iced::keyboard::{self, key::Named, Key, Modifiers};
use iced::Subscription;

use crate::Message;

/// Keyboard shortcuts for navigation.
/// Keys already handled by a widget are left alone.
pub fn subscription() -> Subscription<Message> {
    event::listen_with(|event, status, _id| match event {
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. })
            if status == event::Status::Ignored =>
        {
            map_key(&key, modifiers)
        }
        _ => None,
    })
}

/// ←/→ step a day, `r` jumps to a random day, `t` goes back to today
pub fn map_key(key: &Key, modifiers: Modifiers) -> Option<Message> {
    if modifiers.control() || modifiers.logo() || modifiers.alt() {
        return None;
    }

    match key {
        Key::Named(Named::ArrowLeft) => Some(Message::Previous),
        Key::Named(Named::ArrowRight) => Some(Message::Next),
        Key::Character(c) => match c.as_str() {
            "r" | "R" => Some(Message::Random),
            "t" | "T" => Some(Message::Today),
            _ => None,
        },
        _ => None,
    }
}
