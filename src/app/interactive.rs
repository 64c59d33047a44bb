use crate::app::commands::{
    classify_text, write_basic_examples, write_report, write_table, write_weekly_examples, Context,
};
use crate::utils::error::{display_date_format, Result};
use std::io::{BufRead, Write};

const MENU: &str = "Escolha uma opção:
1 - Inserir dados manualmente
2 - Executar exemplos básicos
3 - Compatibilidade para todas as semanas
4 - Tabela de referência
5 - Sair";

/// Menu loop over a line-oriented input. Ends on option 5 or end of input.
pub struct Session<'a, R: BufRead, W: Write> {
    input: R,
    output: W,
    ctx: &'a Context<'a>,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(input: R, output: W, ctx: &'a Context<'a>) -> Self {
        Self { input, output, ctx }
    }

    pub fn run(mut self) -> Result<()> {
        writeln!(self.output, "=== CALCULADORA DE IDADE GESTACIONAL ===")?;
        writeln!(
            self.output,
            "Intervalo de interpretação: 3 a 16 semanas de gestação"
        )?;
        writeln!(self.output)?;

        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(choice) = self.prompt("Opção: ")? else {
                break;
            };

            let today = self.ctx.today(None)?;
            match choice.as_str() {
                "1" => self.manual_entry()?,
                "2" => write_basic_examples(&mut self.output, self.ctx, today)?,
                "3" => write_weekly_examples(&mut self.output, self.ctx, today)?,
                "4" => write_table(&mut self.output, self.ctx)?,
                "5" => break,
                _ => writeln!(self.output, "Opção inválida!")?,
            }
            writeln!(self.output)?;
        }

        writeln!(self.output, "Encerrando programa...")?;
        tracing::debug!("Interactive session finished");
        Ok(())
    }

    /// `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn manual_entry(&mut self) -> Result<()> {
        let Some(value) = self.prompt("Digite o valor do Beta hCG (mUI/mL): ")? else {
            return Ok(());
        };
        let date_label = format!(
            "Digite a data da última menstruação ({}): ",
            display_date_format(self.ctx.config.date_format())
        );
        let Some(lmp) = self.prompt(&date_label)? else {
            return Ok(());
        };

        let today = self.ctx.today(None)?;
        match classify_text(self.ctx, &value, Some(&lmp), today) {
            Ok(report) => {
                writeln!(self.output)?;
                write_report(&mut self.output, self.ctx, &report)
            }
            Err(e) => {
                tracing::warn!("Manual entry rejected: {}", e);
                writeln!(
                    self.output,
                    "Erro: {}. {}",
                    e.user_friendly_message(),
                    e.recovery_suggestion()
                )?;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml_config::CalculatorConfig;
    use crate::domain::ports::FixedClock;
    use chrono::NaiveDate;

    fn run_session(script: &str) -> String {
        let config = CalculatorConfig::default();
        let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        let ctx = Context::new(&config, &clock);
        let mut out = Vec::new();

        Session::new(script.as_bytes(), &mut out, &ctx).run().unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_manual_entry() {
        let text = run_session("1\n2000\n11/05/2024\n5\n");
        assert!(text.contains("--- RESULTADO ---"));
        assert!(text.contains("Idade gestacional estimada: 5 semanas"));
        assert!(text.contains("compatível"));
        assert!(text.ends_with("Encerrando programa...\n"));
    }

    #[test]
    fn test_manual_entry_with_bad_date() {
        let text = run_session("1\n2000\n2024-05-11\n5\n");
        assert!(text.contains("Erro: Data inválida: '2024-05-11'. Use o formato dd/MM/yyyy"));
    }

    #[test]
    fn test_invalid_option_and_eof() {
        let text = run_session("9\n");
        assert!(text.contains("Opção inválida!"));
        assert!(text.contains("Encerrando programa..."));
    }

    #[test]
    fn test_table_option() {
        let text = run_session("4\n5\n");
        assert!(text.contains("16 | 13300 - 254000"));
    }
}
