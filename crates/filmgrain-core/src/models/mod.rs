mod camera;
mod film;
mod lens;

pub use camera::{Camera, CropFactor};
pub use film::{Film, FilmFormat, UnknownFilmFormat};
pub use lens::Lens;
