//! User-facing phrases.
//!
//! The congregation UI ships in Indonesian; English is kept for tooling
//! and tests. Templates use `{n}` as the single placeholder.

use serde::{Deserialize, Serialize};

/// UI language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    #[default]
    Id,
}

impl Locale {
    pub fn messages(self) -> &'static Messages {
        match self {
            Self::En => &ENGLISH,
            Self::Id => &INDONESIAN,
        }
    }
}

/// Every phrase the engine shows to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    // Notifications
    pub success_title: &'static str,
    pub created: &'static str,
    pub updated: &'static str,
    pub create_failed_title: &'static str,
    pub update_failed_title: &'static str,
    pub create_failed: &'static str,
    pub update_failed: &'static str,
    pub system_error_title: &'static str,
    pub system_error: &'static str,

    // Modal chrome
    pub heading_create: &'static str,
    pub heading_edit: &'static str,
    pub confirm_create: &'static str,
    pub confirm_edit: &'static str,
    pub saving: &'static str,
    pub updating: &'static str,
    pub cancel: &'static str,

    // Validation
    pub required: &'static str,
    pub invalid_email: &'static str,
    pub invalid_number: &'static str,
    pub invalid_date: &'static str,
    pub too_short: &'static str,
    pub too_long: &'static str,
    pub below_min: &'static str,
    pub above_max: &'static str,
    pub step_invalid_title: &'static str,
    pub step_invalid: &'static str,

    // Backend responses
    pub api_ok: &'static str,
    pub api_conflict: &'static str,
    pub api_bad_request: &'static str,
    pub api_not_found: &'static str,
    pub api_unprocessable: &'static str,
    pub api_server_error: &'static str,
    pub api_status: &'static str,
    pub api_network: &'static str,
    pub api_unexpected: &'static str,
}

pub static ENGLISH: Messages = Messages {
    success_title: "Success",
    created: "Data created successfully",
    updated: "Data updated successfully",
    create_failed_title: "Create failed",
    update_failed_title: "Update failed",
    create_failed: "Failed to create data",
    update_failed: "Failed to update data",
    system_error_title: "Error",
    system_error: "A system error occurred",

    heading_create: "New",
    heading_edit: "Edit",
    confirm_create: "Save",
    confirm_edit: "Update",
    saving: "Saving...",
    updating: "Updating...",
    cancel: "Cancel",

    required: "This field is required",
    invalid_email: "Invalid email address",
    invalid_number: "Must be a number",
    invalid_date: "Invalid date, expected YYYY-MM-DD",
    too_short: "Must be at least {n} characters",
    too_long: "Must be at most {n} characters",
    below_min: "Must be at least {n}",
    above_max: "Must be at most {n}",
    step_invalid_title: "Validation failed",
    step_invalid: "Please complete every required field",

    api_ok: "Operation succeeded",
    api_conflict: "Data already exists. Please use different data.",
    api_bad_request: "Invalid data. Please check again.",
    api_not_found: "Data not found.",
    api_unprocessable: "Validation failed. Please check the submitted data.",
    api_server_error: "The server encountered an error. Please try again later.",
    api_status: "An error occurred ({n}). Please try again.",
    api_network: "Cannot reach the server. Check your connection.",
    api_unexpected: "An unexpected error occurred. Please try again.",
};

pub static INDONESIAN: Messages = Messages {
    success_title: "Berhasil",
    created: "Data berhasil ditambahkan",
    updated: "Data berhasil diperbarui",
    create_failed_title: "Gagal menambahkan",
    update_failed_title: "Gagal memperbarui",
    create_failed: "Gagal menambahkan data",
    update_failed: "Gagal memperbarui data",
    system_error_title: "Error",
    system_error: "Terjadi kesalahan sistem",

    heading_create: "Tambah",
    heading_edit: "Edit",
    confirm_create: "Simpan",
    confirm_edit: "Perbarui",
    saving: "Menyimpan...",
    updating: "Memperbarui...",
    cancel: "Batal",

    required: "Wajib diisi",
    invalid_email: "Format email tidak valid",
    invalid_number: "Harus berupa angka",
    invalid_date: "Tanggal tidak valid, gunakan format YYYY-MM-DD",
    too_short: "Minimal {n} karakter",
    too_long: "Maksimal {n} karakter",
    below_min: "Minimal {n}",
    above_max: "Maksimal {n}",
    step_invalid_title: "Validasi Gagal",
    step_invalid: "Mohon lengkapi semua field yang wajib diisi",

    api_ok: "Operasi berhasil",
    api_conflict: "Data sudah ada. Silakan gunakan data yang berbeda.",
    api_bad_request: "Data tidak valid. Silakan periksa kembali.",
    api_not_found: "Data tidak ditemukan.",
    api_unprocessable: "Validasi gagal. Silakan periksa data yang dimasukkan.",
    api_server_error: "Terjadi kesalahan pada server. Silakan coba lagi nanti.",
    api_status: "Terjadi kesalahan ({n}). Silakan coba lagi.",
    api_network: "Tidak dapat terhubung ke server. Periksa koneksi internet Anda.",
    api_unexpected: "Terjadi kesalahan tak terduga. Silakan coba lagi.",
};

/// Substitute `{n}` in a message template.
pub fn fill(template: &str, n: impl std::fmt::Display) -> String {
    template.replace("{n}", &n.to_string())
}
