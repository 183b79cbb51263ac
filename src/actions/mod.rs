pub mod applaunch;
