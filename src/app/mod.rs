// App layer: transports around the command interpreter.

pub mod console;
pub mod dispatch;
pub mod liveness;
