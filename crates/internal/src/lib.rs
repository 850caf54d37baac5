//! Internal utilities for the edgate gateway

#![no_std]

pub mod constant_time;
