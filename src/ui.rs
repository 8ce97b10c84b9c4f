use crate::render::SearchView;

pub fn render_index(view: &SearchView) -> String {
    let [easy, medium, hard] = &view.progress;
    let status = view
        .status
        .as_deref()
        .map(|message| format!("<p>{}</p>", escape_html(message)))
        .unwrap_or_default();

    INDEX_HTML
        .replace("{{USERNAME}}", &escape_html(&view.username))
        .replace("{{BUTTON_LABEL}}", view.button_label)
        .replace("{{BUTTON_DISABLED}}", if view.button_disabled { " disabled" } else { "" })
        .replace("{{STATUS}}", &status)
        .replace("{{EASY_LABEL}}", &easy.label)
        .replace("{{EASY_WIDTH}}", &format_width(easy.width_percent))
        .replace("{{MEDIUM_LABEL}}", &medium.label)
        .replace("{{MEDIUM_WIDTH}}", &format_width(medium.width_percent))
        .replace("{{HARD_LABEL}}", &hard.label)
        .replace("{{HARD_WIDTH}}", &format_width(hard.width_percent))
}

fn format_width(percent: f64) -> String {
    let rounded = (percent * 100.0).round() / 100.0;
    format!("{rounded}%")
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>LeetCode Stats</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f3f1ea;
      --bg-2: #d7e3f4;
      --ink: #2b2a28;
      --accent: #2f4858;
      --easy: #2d9c6a;
      --medium: #e0a526;
      --hard: #d2473b;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e9eef6 60%, #f6f4ef 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(720px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    .subtitle {
      margin: 6px 0 0;
      color: #5f5c57;
    }

    .search {
      display: flex;
      gap: 12px;
    }

    #user-input {
      flex: 1;
      border: 1px solid rgba(47, 72, 88, 0.2);
      border-radius: 999px;
      padding: 14px 18px;
      font: inherit;
    }

    #search-btn {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 14px 24px;
      font: inherit;
      font-weight: 600;
      color: white;
      background: var(--accent);
      cursor: pointer;
    }

    #search-btn:disabled {
      opacity: 0.6;
      cursor: progress;
    }

    .stats-container {
      min-height: 1.2em;
      color: #c63b2b;
    }

    .stats-container p {
      margin: 0;
    }

    .progress-list {
      display: grid;
      gap: 16px;
    }

    .progress-item {
      background: white;
      border-radius: 18px;
      padding: 16px 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 10px;
    }

    .progress-head {
      display: flex;
      justify-content: space-between;
      font-weight: 600;
    }

    .track {
      height: 10px;
      border-radius: 999px;
      background: rgba(47, 72, 88, 0.08);
      overflow: hidden;
    }

    .fill {
      height: 100%;
      border-radius: 999px;
      transition: width 300ms ease;
    }

    .easy-progress { background: var(--easy); }
    .medium-progress { background: var(--medium); }
    .hard-progress { background: var(--hard); }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
      .search {
        flex-direction: column;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>LeetCode Stats</h1>
      <p class="subtitle">Solved problems per difficulty for any public profile.</p>
    </header>

    <form class="search" id="search-form" method="get" action="/">
      <input id="user-input" name="username" type="text" placeholder="Enter a username" value="{{USERNAME}}" autocomplete="off" />
      <button id="search-btn" type="submit"{{BUTTON_DISABLED}}>{{BUTTON_LABEL}}</button>
    </form>

    <div class="stats-container" id="status">{{STATUS}}</div>

    <section class="progress-list">
      <div class="progress-item">
        <div class="progress-head"><span>Easy</span><span id="easy-level">{{EASY_LABEL}}</span></div>
        <div class="track"><div class="fill easy-progress" style="width: {{EASY_WIDTH}}"></div></div>
      </div>
      <div class="progress-item">
        <div class="progress-head"><span>Medium</span><span id="medium-level">{{MEDIUM_LABEL}}</span></div>
        <div class="track"><div class="fill medium-progress" style="width: {{MEDIUM_WIDTH}}"></div></div>
      </div>
      <div class="progress-item">
        <div class="progress-head"><span>Hard</span><span id="hard-level">{{HARD_LABEL}}</span></div>
        <div class="track"><div class="fill hard-progress" style="width: {{HARD_WIDTH}}"></div></div>
      </div>
    </section>
  </main>

  <script>
    const searchButton = document.getElementById('search-btn');
    const usernameInput = document.getElementById('user-input');
    const statusEl = document.getElementById('status');
    const form = document.getElementById('search-form');
    const widgets = {
      Easy: {
        label: document.getElementById('easy-level'),
        fill: document.querySelector('.easy-progress')
      },
      Medium: {
        label: document.getElementById('medium-level'),
        fill: document.querySelector('.medium-progress')
      },
      Hard: {
        label: document.getElementById('hard-level'),
        fill: document.querySelector('.hard-progress')
      }
    };

    const usernamePattern = /^[A-Za-z0-9_]{3,16}$/;

    const setStatus = (message) => {
      statusEl.textContent = '';
      if (message) {
        const p = document.createElement('p');
        p.textContent = message;
        statusEl.appendChild(p);
      }
    };

    const setBusy = (busy) => {
      searchButton.disabled = busy;
      searchButton.textContent = busy ? 'Loading...' : 'Search';
    };

    const showProgress = (stats) => {
      stats.progress.forEach((entry) => {
        const widget = widgets[entry.difficulty];
        if (!widget) {
          return;
        }
        widget.label.textContent = entry.label;
        widget.fill.style.width = `${entry.percent}%`;
      });
    };

    const search = async (username) => {
      if (!usernamePattern.test(username)) {
        setStatus('Invalid username format.');
        return;
      }

      setBusy(true);
      try {
        const res = await fetch(`/api/stats/${encodeURIComponent(username)}`);
        const body = await res.json();
        if (!res.ok) {
          setStatus(body.message || 'No data found.');
          return;
        }
        setStatus('');
        showProgress(body);
        history.replaceState(null, '', `/?username=${encodeURIComponent(username)}`);
      } catch (err) {
        console.error('Error fetching user details:', err);
        setStatus('No data found.');
      } finally {
        setBusy(false);
      }
    };

    form.addEventListener('submit', (event) => {
      event.preventDefault();
      if (searchButton.disabled) {
        return;
      }
      search(usernameInput.value);
    });
  </script>
</body>
</html>
"#;
