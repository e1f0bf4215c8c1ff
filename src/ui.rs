use crate::models::SummaryResponse;

pub fn render_index(date: &str, summary: &SummaryResponse) -> String {
    INDEX_HTML
        .replace("{{DATE}}", date)
        .replace("{{RESULTS}}", &render_results(summary))
}

/// Markup for the results area, also used by the no-script fallback paths.
/// The page script rebuilds the same content client-side from the JSON
/// summary after every mutation.
pub fn render_results(summary: &SummaryResponse) -> String {
    let mut html = String::from("<h3>Turmas:</h3>\n");

    for entry in &summary.entries {
        let label = escape_html(&entry.label);
        html.push_str(&format!(
            "<p class=\"entry-row\">{label}: {} alunos\
             <form class=\"delete-form\" method=\"post\" action=\"/delete\">\
             <input type=\"hidden\" name=\"label\" value=\"{label}\">\
             <button class=\"delete-btn\" type=\"submit\" aria-label=\"Excluir {label}\">&#10005;</button>\
             </form></p>\n",
            entry.students
        ));
    }

    html.push_str("<h3>Totais por Categoria:</h3>\n");
    for row in &summary.categories {
        html.push_str(&format!(
            "<p class=\"category-row\">{}:<br> {} alunos</p>\n",
            escape_html(&row.category),
            row.students
        ));
    }

    html.push_str(&format!(
        "<h3 class=\"total-row\">Total Geral: <span class=\"total-value\">{}</span> alunos</h3>\n",
        summary.total
    ));

    // Reset only shows up once there is something to wipe.
    if !summary.entries.is_empty() {
        html.push_str(
            "<form class=\"reset-form\" method=\"post\" action=\"/reset\">\
             <button class=\"btn btn-reset\" type=\"submit\">Reiniciar</button></form>\n",
        );
    }

    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="pt-BR">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Contagem de Alunos</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
      animation: rise 600ms ease;
    }

    header {
      display: flex;
      flex-direction: column;
      gap: 6px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    .subtitle {
      margin: 0;
      color: #5f5c57;
      font-size: 1rem;
    }

    .date {
      margin: 0;
      color: #5f5c57;
      font-size: 0.95rem;
    }

    .date span {
      font-weight: 600;
      color: var(--accent-2);
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.3rem;
    }

    .class-grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(130px, 1fr));
      gap: 12px;
    }

    .btn,
    .class-btn {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 18px;
      font-size: 0.95rem;
      font-weight: 600;
      cursor: pointer;
      transition: transform 150ms ease, box-shadow 150ms ease;
    }

    .btn:active,
    .class-btn:active {
      transform: scale(0.98);
    }

    .class-btn {
      background: white;
      color: var(--accent-2);
      border: 1px solid rgba(47, 72, 88, 0.14);
    }

    .class-btn:hover {
      box-shadow: 0 8px 18px rgba(47, 72, 88, 0.15);
    }

    .results {
      background: white;
      border-radius: 20px;
      padding: 20px 24px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .results h3 {
      margin: 14px 0 8px;
      font-size: 1.1rem;
      color: var(--accent-2);
    }

    .entry-row {
      margin: 4px 0;
      display: flex;
      align-items: center;
      gap: 10px;
    }

    .delete-form {
      display: inline;
    }

    .delete-btn {
      appearance: none;
      border: none;
      background: transparent;
      color: var(--accent);
      font-size: 1rem;
      cursor: pointer;
      padding: 2px 6px;
    }

    .category-row {
      margin: 4px 0;
      color: #5f5c57;
    }

    .total-row .total-value {
      font-size: 1.6rem;
      color: var(--accent);
      border: 1px dotted var(--accent);
      border-radius: 6px;
      padding: 1px 10px;
      margin: 0 6px;
      display: inline-block;
    }

    .btn-reset {
      background: var(--accent-2);
      color: white;
      box-shadow: 0 10px 24px rgba(47, 72, 88, 0.3);
      margin-top: 12px;
    }

    .btn-confirm {
      background: var(--accent);
      color: white;
      box-shadow: 0 10px 24px rgba(255, 107, 74, 0.3);
    }

    .btn-close {
      background: rgba(47, 72, 88, 0.08);
      color: var(--accent-2);
    }

    .modal-backdrop {
      display: none;
      position: fixed;
      inset: 0;
      background: rgba(43, 42, 40, 0.45);
      place-items: center;
      padding: 18px;
    }

    .modal-backdrop.open {
      display: grid;
    }

    .modal {
      width: min(380px, 100%);
      background: white;
      border-radius: 20px;
      padding: 24px;
      display: grid;
      gap: 14px;
      box-shadow: var(--shadow);
    }

    .modal h2 {
      margin: 0;
    }

    .field {
      display: grid;
      gap: 6px;
      font-size: 0.9rem;
      color: #5f5c57;
    }

    .field input {
      border: 1px solid rgba(47, 72, 88, 0.2);
      border-radius: 10px;
      padding: 10px 12px;
      font-size: 1.1rem;
      font-family: inherit;
    }

    .modal-error {
      margin: 0;
      min-height: 1.2em;
      font-size: 0.9rem;
      color: #c63b2b;
    }

    .modal-actions {
      display: flex;
      gap: 10px;
      justify-content: flex-end;
    }

    .status {
      font-size: 0.95rem;
      color: #6b645d;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Contagem de Alunos</h1>
      <p class="subtitle">Registre a quantidade de alunos por turma e acompanhe os totais.</p>
      <p class="date">Data: <span id="current-date">{{DATE}}</span></p>
    </header>

    <section>
      <h2>Turmas</h2>
      <div class="class-grid">
        <button class="class-btn" type="button" data-label="1º ANO">1º ANO</button>
        <button class="class-btn" type="button" data-label="2º ANO">2º ANO</button>
        <button class="class-btn" type="button" data-label="3º ANO">3º ANO</button>
        <button class="class-btn" type="button" data-label="4º ANO">4º ANO</button>
        <button class="class-btn" type="button" data-label="5º ANO">5º ANO</button>
        <button class="class-btn" type="button" data-label="6º ANO">6º ANO</button>
        <button class="class-btn" type="button" data-label="7º ANO">7º ANO</button>
        <button class="class-btn" type="button" data-label="8º ANO">8º ANO</button>
        <button class="class-btn" type="button" data-label="9º ANO">9º ANO</button>
        <button class="class-btn" type="button" data-label="1º ANO M">1º ANO M</button>
        <button class="class-btn" type="button" data-label="2º ANO M">2º ANO M</button>
        <button class="class-btn" type="button" data-label="3º ANO M">3º ANO M</button>
      </div>
    </section>

    <section class="results" id="results">{{RESULTS}}</section>

    <div class="status" id="status"></div>
  </main>

  <div class="modal-backdrop" id="modal">
    <form class="modal" id="modal-form" method="post" action="/count">
      <h2 id="modal-title"></h2>
      <input type="hidden" name="label" id="modal-label" value="" />
      <label class="field">
        <span>Quantidade de alunos</span>
        <input
          type="number"
          id="quantity"
          name="quantity"
          min="1"
          step="1"
          inputmode="numeric"
          autocomplete="off"
        />
      </label>
      <p class="modal-error" id="modal-error"></p>
      <div class="modal-actions">
        <button class="btn btn-confirm" type="submit">Confirmar</button>
        <button class="btn btn-close" id="close-btn" type="button">Fechar</button>
      </div>
    </form>
  </div>

  <script>
    const init = () => {
      const modal = document.getElementById('modal');
      const modalForm = document.getElementById('modal-form');
      const modalTitle = document.getElementById('modal-title');
      const modalLabel = document.getElementById('modal-label');
      const quantityInput = document.getElementById('quantity');
      const modalError = document.getElementById('modal-error');
      const closeBtn = document.getElementById('close-btn');
      const resultsEl = document.getElementById('results');
      const statusEl = document.getElementById('status');

      if (
        !modal || !modalForm || !modalTitle || !modalLabel || !quantityInput ||
        !modalError || !closeBtn || !resultsEl || !statusEl
      ) {
        console.error('Page elements missing; keeping the server-rendered page.');
        return;
      }

      let summary = null;

      const setStatus = (message, type) => {
        statusEl.textContent = message;
        statusEl.dataset.type = type || '';
      };

      const escapeHtml = (text) =>
        String(text).replace(/[&<>"']/g, (ch) => ({
          '&': '&amp;',
          '<': '&lt;',
          '>': '&gt;',
          '"': '&quot;',
          "'": '&#39;'
        })[ch]);

      const renderResults = () => {
        let html = '<h3>Turmas:</h3>';
        for (const entry of summary.entries) {
          const label = escapeHtml(entry.label);
          html +=
            '<p class="entry-row">' + label + ': ' + entry.students + ' alunos' +
            '<button class="delete-btn" type="button" data-label="' + label +
            '" aria-label="Excluir ' + label + '">&#10005;</button></p>';
        }
        html += '<h3>Totais por Categoria:</h3>';
        for (const row of summary.categories) {
          html +=
            '<p class="category-row">' + escapeHtml(row.category) + ':<br> ' +
            row.students + ' alunos</p>';
        }
        html +=
          '<h3 class="total-row">Total Geral: <span class="total-value">' +
          summary.total + '</span> alunos</h3>';
        if (summary.entries.length > 0) {
          html += '<button class="btn btn-reset" id="reset-btn" type="button">Reiniciar</button>';
        }
        resultsEl.innerHTML = html;
      };

      const applySummary = (data) => {
        summary = data;
        renderResults();
      };

      const send = async (path, body) => {
        const res = await fetch(path, {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify(body)
        });
        if (!res.ok) {
          const msg = await res.text();
          throw new Error(msg || 'Falha na requisição');
        }
        applySummary(await res.json());
      };

      const fetchSummary = async () => {
        const res = await fetch('/api/summary');
        if (!res.ok) {
          throw new Error('Não foi possível carregar os dados');
        }
        applySummary(await res.json());
      };

      // Entry flow. The open label lives in the form's hidden input, scoped
      // to the dialog rather than a shared variable.
      const openEntry = (label) => {
        modalLabel.value = label;
        modalTitle.textContent = label;
        modalError.textContent = '';
        const existing = summary && summary.entries.find((entry) => entry.label === label);
        quantityInput.value = existing ? existing.students : '';
        modal.classList.add('open');
        quantityInput.focus();
      };

      const closeEntry = () => {
        modal.classList.remove('open');
        modalForm.reset();
      };

      document.querySelectorAll('.class-btn').forEach((button) => {
        button.addEventListener('click', () => openEntry(button.dataset.label));
      });

      closeBtn.addEventListener('click', closeEntry);

      modalForm.addEventListener('submit', (event) => {
        event.preventDefault();
        modalError.textContent = '';
        send('/api/count', { label: modalLabel.value, quantity: quantityInput.value })
          .then(() => {
            closeEntry();
            setStatus('Salvo', 'ok');
            setTimeout(() => setStatus('', ''), 1200);
          })
          .catch((err) => {
            modalError.textContent = err.message;
          });
      });

      resultsEl.addEventListener('click', (event) => {
        const button = event.target.closest('button');
        if (!button) {
          return;
        }
        if (button.id === 'reset-btn') {
          send('/api/reset', {}).catch((err) => setStatus(err.message, 'error'));
        } else if (button.classList.contains('delete-btn')) {
          send('/api/delete', { label: button.dataset.label })
            .catch((err) => setStatus(err.message, 'error'));
        }
      });

      fetchSummary().catch((err) => setStatus(err.message, 'error'));
    };

    init();
  </script>
</body>
</html>
"##;
