//! The fixed catalog of visit purposes offered on the kiosk form.

use serde::Serialize;

/// One selectable purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Purpose {
  pub code:  &'static str,
  pub label: &'static str,
}

/// Code that switches the form to a free-text description.
pub const OTHER: &str = "LAINNYA";

pub const CATALOG: &[Purpose] = &[
  Purpose { code: "DATA_PEMILIH",       label: "Layanan Pemutakhiran Data Pemilih" },
  Purpose { code: "PENCALONAN",         label: "Layanan Pencalonan Peserta Pemilu/Pilkada" },
  Purpose { code: "VERPOL",             label: "Layanan Verifikasi dan Pemutakhiran Data Partai Politik" },
  Purpose { code: "PPID",               label: "Layanan PPID" },
  Purpose { code: "PENDIDIKAN_PEMILIH", label: "Layanan Pendidikan Pemilih" },
  Purpose { code: "ADHOC",              label: "Layanan Rekrutmen Badan Adhoc" },
  Purpose { code: "LPSE",               label: "Layanan Pengadaan Secara Elektronik (LPSE)" },
  Purpose { code: "PENGADUAN",          label: "Layanan Pengaduan Masyarakat" },
  Purpose { code: "PAW_DPRD",           label: "Layanan Persiapan Pergantian Antar Waktu Anggota DPRD" },
  Purpose { code: OTHER,                label: "Lainnya / Umum" },
];

/// Look up a catalog entry by its code.
pub fn find(code: &str) -> Option<&'static Purpose> {
  CATALOG.iter().find(|p| p.code == code)
}
