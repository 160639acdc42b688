mod pointer;
mod viewport;

pub use pointer::wire_pointer_parallax;
pub use viewport::wire_canvas_resize;
