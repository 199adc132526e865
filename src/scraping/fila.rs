// Mapeo posicional fila HTML -> campos.
//
// La guía de horarios no trae encabezados confiables, así que las columnas se
// leen por posición. Si la institución cambia el orden de las columnas, este
// es el único lugar que hay que tocar.

/// Número de celdas `<td>` que trae una fila de datos.
pub const EXPECTED_CELLS: usize = 11;

/// Una fila de la tabla `tguiaHorario`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilaHorario {
    pub codigo: String,
    pub nombre: String,
    pub grupo: String,
    pub creditos: String,
    /// p.ej. "Martes - 9:30:11:20"
    pub dia_hora: String,
    pub aula: String,
    pub profesor: String,
    pub cupo: String,
    pub categoria: String,
    pub regularidad: String,
    pub frecuencia: String,
}

/// Colapsa espacios (incluye saltos de línea y nbsp) y recorta.
/// Los caracteres no ASCII se preservan tal cual.
pub fn limpiar_celda(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl FilaHorario {
    /// `None` si la fila tiene menos celdas de las esperadas (encabezados, filas rotas).
    pub fn from_cells(cells: &[String]) -> Option<FilaHorario> {
        if cells.len() < EXPECTED_CELLS {
            return None;
        }
        let c = |i: usize| limpiar_celda(&cells[i]);
        Some(FilaHorario {
            codigo: c(0),
            nombre: c(1),
            grupo: c(2),
            creditos: c(3),
            dia_hora: c(4),
            aula: c(5),
            profesor: c(6),
            cupo: c(7),
            categoria: c(8),
            regularidad: c(9),
            frecuencia: c(10),
        })
    }

    pub fn creditos_num(&self) -> u32 {
        self.creditos.parse().unwrap_or(0)
    }

    pub fn cupo_num(&self) -> u32 {
        self.cupo.parse().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_from_cells_posicional() {
        let row = cells(&[
            " CA2125 ", "Elementos de computaci\u{FFFD}n", "01", "3", "Martes - 9:30:11:20",
            "B6-04", "Mata\n   Rodriguez William", "24", "Curso Comun", "Regular", "1",
        ]);
        let f = FilaHorario::from_cells(&row).unwrap();
        assert_eq!(f.codigo, "CA2125");
        assert_eq!(f.nombre, "Elementos de computaci\u{FFFD}n");
        assert_eq!(f.profesor, "Mata Rodriguez William");
        assert_eq!(f.creditos_num(), 3);
        assert_eq!(f.cupo_num(), 24);
        assert_eq!(f.frecuencia, "1");
    }

    #[test]
    fn test_from_cells_fila_corta() {
        assert!(FilaHorario::from_cells(&cells(&["Código", "Nombre"])).is_none());
    }
}
