mod category;
mod product;
mod product_image;
mod response;

pub use category::*;
pub use product::*;
pub use product_image::*;
pub use response::*;
