//! Built-in master-data forms.
//!
//! Reference tables the congregation admin maintains through plain
//! create/edit modals. Paths are relative to the backend API root.

use crate::config::FormDefinition;
use crate::field::{FieldDescriptor, FieldKind};

/// Tables with a single required name plus an optional note.
const SIMPLE_TABLES: &[(&str, &str, &str)] = &[
    ("pendidikan", "Pendidikan", "/pendidikan"),
    ("pekerjaan", "Pekerjaan", "/pekerjaan"),
    ("suku", "Suku", "/suku"),
    ("jaminan-kesehatan", "Jaminan Kesehatan", "/jaminan-kesehatan"),
    ("status-dalam-keluarga", "Status Dalam Keluarga", "/status-dalam-keluarga"),
    ("status-kepemilikan-rumah", "Status Kepemilikan Rumah", "/status-kepemilikan-rumah"),
    ("keadaan-rumah", "Keadaan Rumah", "/keadaan-rumah"),
    ("status-keluarga", "Status Keluarga", "/status-keluarga"),
    ("status-keanggotaan", "Status Keanggotaan", "/status-keanggotaan"),
    ("pendapatan", "Pendapatan", "/pendapatan"),
    ("rayon", "Rayon", "/rayon"),
    ("kategori-jadwal", "Kategori Jadwal", "/kategori-jadwal"),
    ("jenis-jabatan", "Jenis Jabatan", "/jenis-jabatan"),
    ("kategori-pengumuman", "Kategori Pengumuman", "/kategori-pengumuman"),
    ("provinsi", "Provinsi", "/geografi/provinsi"),
];

fn name_field(label: &str) -> FieldDescriptor {
    FieldDescriptor::new(FieldKind::Text, "nama", label)
        .required()
        .with_placeholder(format!("Masukkan {}", label.to_lowercase()))
        .with_length(Some(2), Some(100))
}

fn note_field() -> FieldDescriptor {
    FieldDescriptor::new(FieldKind::TextArea, "keterangan", "Keterangan").with_length(None, Some(500))
}

/// Every built-in form, in menu order.
pub fn master_forms() -> Vec<FormDefinition> {
    let mut forms: Vec<FormDefinition> = SIMPLE_TABLES
        .iter()
        .map(|(key, title, path)| FormDefinition::new(key, title, path, vec![name_field(title), note_field()]))
        .collect();

    forms.push(FormDefinition::new(
        "kota-kabupaten",
        "Kota/Kabupaten",
        "/geografi/kota-kabupaten",
        vec![
            FieldDescriptor::new(FieldKind::Autocomplete, "idProvinsi", "Provinsi")
                .required()
                .with_endpoint("/geografi/provinsi"),
            name_field("Kota/Kabupaten"),
        ],
    ));
    forms.push(FormDefinition::new(
        "kecamatan",
        "Kecamatan",
        "/geografi/kecamatan",
        vec![
            FieldDescriptor::new(FieldKind::Autocomplete, "idKotaKab", "Kota/Kabupaten")
                .required()
                .with_endpoint("/geografi/kota-kabupaten"),
            name_field("Kecamatan"),
        ],
    ));
    forms.push(FormDefinition::new(
        "kelurahan-desa",
        "Kelurahan/Desa",
        "/geografi/kelurahan-desa",
        vec![
            FieldDescriptor::new(FieldKind::Autocomplete, "idKecamatan", "Kecamatan")
                .required()
                .with_endpoint("/geografi/kecamatan"),
            name_field("Kelurahan/Desa"),
            FieldDescriptor::new(FieldKind::Number, "kodePos", "Kode Pos").with_range(Some(10000.0), Some(99999.0)),
        ],
    ));
    forms.push(FormDefinition::new(
        "jenis-pengumuman",
        "Jenis Pengumuman",
        "/jenis-pengumuman",
        vec![
            FieldDescriptor::new(FieldKind::Select, "kategoriId", "Kategori")
                .required()
                .with_endpoint("/kategori-pengumuman"),
            name_field("Jenis Pengumuman"),
            note_field(),
        ],
    ));
    forms.push(FormDefinition::new(
        "jenis-ibadah",
        "Jenis Ibadah",
        "/jenis-ibadah",
        vec![
            FieldDescriptor::new(FieldKind::Text, "namaIbadah", "Nama Ibadah")
                .required()
                .with_length(Some(3), Some(100)),
            FieldDescriptor::new(FieldKind::TextArea, "deskripsi", "Deskripsi"),
        ],
    ));

    forms
}
