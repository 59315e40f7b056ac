pub mod action;
pub mod api;
pub mod app;
pub mod component;
pub mod components;
pub mod controller;
pub mod player;
pub mod theme;
pub mod widgets;
