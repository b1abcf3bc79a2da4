mod help;
mod hud;
mod menu_bar;
mod minimap;
mod thumbnails;
mod toolbar;
