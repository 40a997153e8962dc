mod send_reminders;

pub use send_reminders::{ReminderRunStats, SendDeadlineRemindersUseCase};
