pub(crate) mod keyboard;

pub(crate) use keyboard::keyboard_task;
