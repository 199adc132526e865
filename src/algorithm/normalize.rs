// Normalización de franjas "Día - H:MM:H:MM" provenientes de la guía de horarios.
use std::fmt;

use crate::models::Dia;

/// Franja normalizada: día y horas "HH:MM" con ceros a la izquierda.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedSlot {
    pub day: Dia,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// No aparece el separador `-` entre el día y las horas
    MissingSeparator,
    UnknownDay(String),
    /// No hay exactamente cuatro grupos numéricos
    BadTimeGroups(String),
    OutOfRange(String),
    /// inicio >= fin
    EmptyRange(String),
}

impl fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizeError::MissingSeparator => write!(f, "missing '-' between day and time range"),
            NormalizeError::UnknownDay(d) => write!(f, "unknown day name '{}'", d),
            NormalizeError::BadTimeGroups(t) => write!(f, "expected H:MM:H:MM, got '{}'", t),
            NormalizeError::OutOfRange(t) => write!(f, "hour or minute out of range in '{}'", t),
            NormalizeError::EmptyRange(t) => write!(f, "start is not before end in '{}'", t),
        }
    }
}

impl std::error::Error for NormalizeError {}

pub fn format_hhmm(h: u32, m: u32) -> String {
    format!("{:02}:{:02}", h, m)
}

/// Parsear una franja cruda a `NormalizedSlot`.
/// Ejemplo: "Martes - 9:30:11:20" -> (Martes, "09:30", "11:20")
///
/// El feed une las dos horas con ':' (inicio_h:inicio_m:fin_h:fin_m); también
/// se acepta un '-' entre ambas.
pub fn normalize_session(raw: &str) -> Result<NormalizedSlot, NormalizeError> {
    let (dia_raw, horas_raw) = raw.split_once('-').ok_or(NormalizeError::MissingSeparator)?;
    let day = Dia::from_nombre(dia_raw).ok_or_else(|| NormalizeError::UnknownDay(dia_raw.trim().to_string()))?;

    let horas = horas_raw.trim();
    let grupos: Vec<&str> = horas
        .split(|c| c == ':' || c == '-')
        .map(|g| g.trim())
        .filter(|g| !g.is_empty())
        .collect();
    if grupos.len() != 4 {
        return Err(NormalizeError::BadTimeGroups(horas.to_string()));
    }
    let mut nums = [0u32; 4];
    for (i, g) in grupos.iter().enumerate() {
        nums[i] = g.parse::<u32>().map_err(|_| NormalizeError::BadTimeGroups(horas.to_string()))?;
    }
    let [sh, sm, eh, em] = nums;
    if sh > 23 || eh > 23 || sm > 59 || em > 59 {
        return Err(NormalizeError::OutOfRange(horas.to_string()));
    }
    if sh * 60 + sm >= eh * 60 + em {
        return Err(NormalizeError::EmptyRange(horas.to_string()));
    }

    Ok(NormalizedSlot {
        day,
        start_time: format_hhmm(sh, sm),
        end_time: format_hhmm(eh, em),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_feed_format() {
        let slot = normalize_session("Martes - 9:30:11:20").unwrap();
        assert_eq!(slot.day, Dia::Martes);
        assert_eq!(slot.start_time, "09:30");
        assert_eq!(slot.end_time, "11:20");
    }

    #[test]
    fn test_normalize_dos_digitos_y_espacios() {
        let slot = normalize_session("  Jueves -  13:00:14:50 ").unwrap();
        assert_eq!(slot.day, Dia::Jueves);
        assert_eq!(slot.start_time, "13:00");
        assert_eq!(slot.end_time, "14:50");
    }

    #[test]
    fn test_normalize_guion_entre_horas() {
        let slot = normalize_session("Lunes - 7:30 - 9:20").unwrap();
        assert_eq!(slot.start_time, "07:30");
        assert_eq!(slot.end_time, "09:20");
    }

    #[test]
    fn test_normalize_errores() {
        assert_eq!(normalize_session("Martes 9:30:11:20"), Err(NormalizeError::MissingSeparator));
        assert!(matches!(normalize_session("Someday - 9:30:11:20"), Err(NormalizeError::UnknownDay(_))));
        assert!(matches!(normalize_session("Martes - 9:30:11"), Err(NormalizeError::BadTimeGroups(_))));
        assert!(matches!(normalize_session("Martes - 9:xx:11:20"), Err(NormalizeError::BadTimeGroups(_))));
        assert!(matches!(normalize_session("Martes - 25:00:26:00"), Err(NormalizeError::OutOfRange(_))));
        assert!(matches!(normalize_session("Martes - 11:20:9:30"), Err(NormalizeError::EmptyRange(_))));
    }
}
